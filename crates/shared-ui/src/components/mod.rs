// Standalone components
pub mod badge;
pub mod button;
pub mod callout;
pub mod card;
pub mod data_table;
pub mod form_select;
pub mod input;
pub mod meter;
pub mod page_header;
pub mod skeleton;
pub mod textarea;

// Primitive wrappers
pub mod toast;

pub use badge::*;
pub use button::*;
pub use callout::*;
pub use card::*;
pub use data_table::*;
pub use form_select::*;
pub use input::*;
pub use meter::*;
pub use page_header::*;
pub use skeleton::*;
pub use textarea::*;
pub use toast::*;
