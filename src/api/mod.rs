//! API module
//!
//! Resource façades built on an [`crate::http::ApiClient`]:
//!
//! - [`ResourceApi`]: CRUD plus paginated and aggregated reads
//! - [`CheckoutApi`]: checkout steps submitted with `PUT`
//! - [`ApiResolver`]: builds a façade from a logical resource name

mod checkout;
mod object;
mod resolver;
mod resource;

pub use checkout::{CheckoutApi, CART_ID_PARAM};
pub use object::ApiObject;
pub use resolver::ApiResolver;
pub use resource::{ResourceApi, GET_ALL_LIMIT};
