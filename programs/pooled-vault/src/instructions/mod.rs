pub mod add_supported_asset;
pub mod deposit;
pub mod go_live;
pub mod initialize;
pub mod pause;
pub mod realize_profit;
pub mod return_to_fundraising;
pub mod set_asset_whitelist;
pub mod set_vault_state;
pub mod status;
pub mod update_fees;
pub mod withdraw;

pub use add_supported_asset::*;
pub use deposit::*;
pub use go_live::*;
pub use initialize::*;
pub use pause::*;
pub use realize_profit::*;
pub use return_to_fundraising::*;
pub use set_asset_whitelist::*;
pub use set_vault_state::*;
pub use status::*;
pub use update_fees::*;
pub use withdraw::*;
