pub mod util;
pub mod world_bank;

pub use world_bank::WorldBankProvider;
