//! Types that represent the data flowing through a conversion: the generic CSV `Records` that are
//! read from disk, the Mint columns found in them, and the `MonarchRow`s that are written out.
mod amount;
mod mapping;
pub(crate) mod mint;
mod monarch;
mod record;

pub use amount::{Amount, AmountError};
pub use mapping::{Header, Mapping, MappingError};
pub use mint::TransactionType;
pub use monarch::MonarchRow;
pub use record::{Record, Records};
