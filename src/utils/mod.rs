pub(crate) mod json_fields;
