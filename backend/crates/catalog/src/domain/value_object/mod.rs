pub mod confidence;
pub mod criteria;
pub mod evaluation_result;
pub mod image_record;
pub mod item_fields;
pub mod item_status;
