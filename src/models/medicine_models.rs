use diesel::prelude::{Insertable, QueryableByName};
use diesel::sql_types::{BigInt, Text};
use serde::{Deserialize, Serialize};

use crate::models::vital_sign_models::Unit;

#[derive(Debug, Clone, Default, PartialEq, QueryableByName, Serialize, Deserialize)]
#[serde(default)]
pub struct Shape {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formulation {
    pub id: i64,
    pub shape: Shape,
    pub unit: Unit,
}

/// A medicine and its formulation. On POST only `formulation.id` is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medicine {
    pub id: i64,
    pub formulation: Formulation,
    pub name: String,
    pub dose: i64,
}

#[derive(QueryableByName)]
pub struct FormulationRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub shape_id: i64,
    #[diesel(sql_type = Text)]
    pub shape_description: String,
    #[diesel(sql_type = BigInt)]
    pub unit_id: i64,
    #[diesel(sql_type = Text)]
    pub unit_symbol: String,
    #[diesel(sql_type = Text)]
    pub unit_description: String,
}

impl From<FormulationRow> for Formulation {
    fn from(r: FormulationRow) -> Self {
        Formulation {
            id: r.id,
            shape: Shape {
                id: r.shape_id,
                description: r.shape_description,
            },
            unit: Unit {
                id: r.unit_id,
                symbol: r.unit_symbol,
                description: r.unit_description,
            },
        }
    }
}

#[derive(QueryableByName)]
pub struct MedicineRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub formulation_id: i64,
    #[diesel(sql_type = BigInt)]
    pub shape_id: i64,
    #[diesel(sql_type = Text)]
    pub shape_description: String,
    #[diesel(sql_type = BigInt)]
    pub unit_id: i64,
    #[diesel(sql_type = Text)]
    pub unit_symbol: String,
    #[diesel(sql_type = Text)]
    pub unit_description: String,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = BigInt)]
    pub dose: i64,
}

impl From<MedicineRow> for Medicine {
    fn from(r: MedicineRow) -> Self {
        Medicine {
            id: r.id,
            formulation: Formulation {
                id: r.formulation_id,
                shape: Shape {
                    id: r.shape_id,
                    description: r.shape_description,
                },
                unit: Unit {
                    id: r.unit_id,
                    symbol: r.unit_symbol,
                    description: r.unit_description,
                },
            },
            name: r.name,
            dose: r.dose,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::medicine)]
pub struct NewMedicine<'a> {
    pub formulation_id: i64,
    pub name: &'a str,
    pub dose: i64,
}

impl<'a> From<&'a Medicine> for NewMedicine<'a> {
    fn from(m: &'a Medicine) -> Self {
        NewMedicine {
            formulation_id: m.formulation.id,
            name: &m.name,
            dose: m.dose,
        }
    }
}
