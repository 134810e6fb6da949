use diesel::prelude::QueryableByName;
use diesel::sql_types::{BigInt, Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, QueryableByName, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub symbol: String,
    #[diesel(sql_type = Text)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSign {
    pub id: i64,
    pub unit: Unit,
    pub description: String,
}

#[derive(QueryableByName)]
pub struct VitalSignRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub unit_id: i64,
    #[diesel(sql_type = Text)]
    pub unit_symbol: String,
    #[diesel(sql_type = Text)]
    pub unit_description: String,
    #[diesel(sql_type = Text)]
    pub description: String,
}

impl From<VitalSignRow> for VitalSign {
    fn from(r: VitalSignRow) -> Self {
        VitalSign {
            id: r.id,
            unit: Unit {
                id: r.unit_id,
                symbol: r.unit_symbol,
                description: r.unit_description,
            },
            description: r.description,
        }
    }
}
