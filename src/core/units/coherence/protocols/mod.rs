//! One module per coherence scheme, each a zero-sized [`ProtocolEngine`]
//! implementor transcribing that scheme's cache-side and snoop-side
//! transition table.

pub mod mesi;
pub mod mesif;
pub mod mi;
pub mod moesi;
pub mod msi;

pub use mesi::Mesi;
pub use mesif::Mesif;
pub use mi::Mi;
pub use moesi::Moesi;
pub use msi::Msi;
