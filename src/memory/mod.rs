//! A set of types which model the memory a debugged program sees.

mod bank;
mod region;
mod rombin;
mod storage;
mod traits;

pub use bank::{BankTable, PAGE_COUNT, PAGE_SIZE};
pub use region::{AddressDescriptor, MemoryType, RegionType};
pub use rombin::BinaryImage;
pub use storage::{Block, Storage};
pub use traits::MemoryPort;
