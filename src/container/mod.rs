//! The live-container seam.
//!
//! The engine never talks to a real container directly: everything it needs
//! goes through [`ContainerView`]. Production reports read a
//! [`ContainerSnapshot`] exported from the running application; tests use
//! [`mocks::MockContainer`].
//!
//! # Example
//! ```
//! use wirescope::container::{mocks::MockContainer, ContainerView};
//! use wirescope::spi::{BindingTarget, RawBinding};
//! use wirescope::BindingKey;
//!
//! let clock = BindingKey::new("com.app.Clock");
//! let container = MockContainer::new()
//!     .with_binding(RawBinding::new(clock.clone(), BindingTarget::Constructor).just_in_time());
//!
//! assert!(container.existing_binding(&clock).is_some());
//! assert!(container.explicit_keys().is_empty());
//! ```

pub mod mocks;
pub mod snapshot;
pub mod traits;

pub use snapshot::{ContainerContext, ContainerSnapshot};
pub use traits::ContainerView;
