//! Domain layer: strong types with validation and invariants (no I/O).

mod phone;
mod request;
mod response;
mod validation;
mod value;

pub use phone::{DEFAULT_COUNTRY_CODE, PhoneNumber, normalize_numbers};
pub use request::{RECIPIENTS_FIELD, SendOptions, SendSms};
pub use response::{ApiResult, SendOutcome, Status};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageText, Password, Priority, SenderId, Username};
