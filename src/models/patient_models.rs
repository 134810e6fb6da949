use diesel::prelude::{Insertable, QueryableByName};
use diesel::sql_types::{BigInt, Bool, Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, QueryableByName, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub last_name: String,
    #[diesel(sql_type = Bool)]
    pub gender: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::patient)]
pub struct NewPatient<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub gender: bool,
}

impl<'a> From<&'a Patient> for NewPatient<'a> {
    fn from(p: &'a Patient) -> Self {
        NewPatient {
            name: &p.name,
            last_name: &p.last_name,
            gender: p.gender,
        }
    }
}
