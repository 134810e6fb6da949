pub mod json_utils;
pub mod pagination_utils;
