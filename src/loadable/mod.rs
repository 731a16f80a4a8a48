//! Six-state loadable values and their stateful holder.
//!
//! [`Loadable`] layers a flight axis (idle / busy) over the availability
//! axis (none / value / error) of a [`Failable`](crate::Failable):
//!
//! - `loading()` from `empty` enters `pending`
//! - from `success` it enters `reloading`, keeping the value
//! - from `failure` it enters `retrying`, keeping the error
//! - from any busy state it does nothing
//!
//! [`LoadableCell`] is the shared, observable holder for one such value.

mod cell;
mod history;
mod value;

pub use cell::{LoadableCell, DEFAULT_HISTORY_LIMIT};
pub use history::{StateHistory, StateTransition};
pub use value::Loadable;
