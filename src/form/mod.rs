mod choices;
mod editor;
mod field;
mod state;

pub use choices::{
    ChoiceError, ChoiceHost, ChoiceLimits, ChoiceListEditor, ChoiceRow, DEFAULT_MAX_CHOICE_LENGTH,
    DEFAULT_MAX_CHOICES, PasteOutcome, validate_choice_list,
};
pub use editor::{EditOutcome, RecordEditor, SubmitOutcome};
pub use field::{DISPLAY_ALPHA_OPTIONS, FieldId, REQUIRED_OFF_LABEL, REQUIRED_ON_LABEL};
pub use state::{FormState, LABEL_REQUIRED};
