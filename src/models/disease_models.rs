use diesel::prelude::{Insertable, QueryableByName};
use diesel::sql_types::{BigInt, Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, QueryableByName, Serialize, Deserialize)]
#[serde(default)]
pub struct Disease {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub description: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::disease)]
pub struct NewDisease<'a> {
    pub description: &'a str,
}
