//! # Smartsupp chat snippet generator
//!
//! Builds the `<script>` block that loads the Smartsupp live chat widget
//! with a given set of options. Every caller-supplied value is escaped
//! with [`escape`] before it is embedded, so visitor data such as names or
//! emails cannot break out of the generated JavaScript.
//!
//! ## Example
//! ```
//! use smartsupp_snippet::ChatGenerator;
//!
//! let mut chat = ChatGenerator::with_key("XYZ123456");
//! chat.set_align("left", "side", 20, 120)?
//!     .set_email("johny@depp.com")
//!     .set_variable("orderTotal", "Total orders", 150);
//!
//! let snippet = chat.render()?;
//! assert!(snippet.starts_with("<script type=\"text/javascript\">"));
//! # Ok::<(), smartsupp_snippet::ChatError>(())
//! ```

pub mod chat_generator;
pub mod config_document;
pub mod config_types;
pub mod config_value;
pub mod error;
pub mod escape;
pub mod validator;

pub use chat_generator::ChatGenerator;
pub use config_document::{ChatConfigDocument, chat_generator_from_json};
pub use config_types::{AlignX, AlignY, Alignment, AllowListed, Rating, RatingType, Variable, Widget};
pub use config_value::VariableValue;
pub use error::{ChatError, ChatResult};
pub use escape::escape;
