use diesel::prelude::QueryableByName;
use diesel::sql_types::{BigInt, Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, QueryableByName, Serialize, Deserialize)]
#[serde(default)]
pub struct Exam {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub description: String,
}
