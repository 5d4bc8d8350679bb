mod convert;
mod record;

pub use convert::parse_flag;
pub use record::SelectField;
