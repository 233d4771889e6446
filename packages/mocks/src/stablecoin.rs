//! Mock regulated stablecoin.
//!
//! Balances, allowances and supply come from `cw20-base`. On top of it the
//! token keeps an owner, a master minter that can add or remove the single
//! minter, a blacklist and a global pause. Blacklisted accounts can neither
//! send nor receive, and nothing moves while paused.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Storage, Uint128,
};
use cw20::{Cw20Coin, Cw20ExecuteMsg, MinterResponse};
use cw20_base::msg::QueryMsg as BaseQueryMsg;
use cw20_base::state::{MinterData, TOKEN_INFO};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};
use thiserror::Error;

pub use common::token::BlacklistedResponse;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_balances: Vec<Cw20Coin>,
    pub minter: Option<String>,
    pub owner: String,
    pub master_minter: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    // CW20 surface
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<cw20::Expiration>,
    },
    Mint {
        recipient: String,
        amount: Uint128,
    },
    Burn {
        amount: Uint128,
    },

    // Stablecoin administration
    ConfigureMinter {
        minter: String,
    },
    RemoveMinter {
        minter: String,
    },
    UpdateMasterMinter {
        new_master_minter: String,
    },
    TransferOwnership {
        new_owner: String,
    },
    ChangeAdmin {
        new_admin: String,
    },
    Blacklist {
        account: String,
    },
    Unblacklist {
        account: String,
    },
    Pause {},
    Unpause {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},
    #[returns(Option<MinterResponse>)]
    Minter {},
    #[returns(BlacklistedResponse)]
    IsBlacklisted { address: String },
    #[returns(RolesResponse)]
    Roles {},
    #[returns(UpgradeInfoResponse)]
    UpgradeInfo {},
}

#[cw_serde]
pub struct RolesResponse {
    pub owner: String,
    pub master_minter: String,
    pub admin: Option<String>,
    pub paused: bool,
}

#[cw_serde]
pub struct UpgradeInfoResponse {
    pub migrations: u64,
    pub last_note: Option<String>,
}

#[cw_serde]
pub struct MigrateMsg {
    pub note: Option<String>,
}

#[derive(Error, Debug)]
pub enum StablecoinError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Cw20(#[from] cw20_base::ContractError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Account {address} is blacklisted")]
    Blacklisted { address: String },

    #[error("Token is paused")]
    Paused,

    #[error("{address} is not a minter")]
    NotMinter { address: String },
}

const OWNER: Item<Addr> = Item::new("owner");
const MASTER_MINTER: Item<Addr> = Item::new("master_minter");
const ADMIN: Item<String> = Item::new("admin");
const PAUSED: Item<bool> = Item::new("paused");
const BLACKLIST: Map<&str, bool> = Map::new("blacklist");
const MIGRATIONS: Item<u64> = Item::new("migrations");
const LAST_NOTE: Item<String> = Item::new("last_note");

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, StablecoinError> {
    let owner = deps.api.addr_validate(&msg.owner)?;
    let master_minter = deps.api.addr_validate(&msg.master_minter)?;
    OWNER.save(deps.storage, &owner)?;
    MASTER_MINTER.save(deps.storage, &master_minter)?;
    PAUSED.save(deps.storage, &false)?;
    MIGRATIONS.save(deps.storage, &0)?;

    let base = cw20_base::msg::InstantiateMsg {
        name: msg.name,
        symbol: msg.symbol,
        decimals: msg.decimals,
        initial_balances: msg.initial_balances,
        mint: msg.minter.map(|minter| MinterResponse { minter, cap: None }),
        marketing: None,
    };
    Ok(cw20_base::contract::instantiate(deps, env, info, base)?)
}

fn ensure_not_paused(storage: &dyn Storage) -> Result<(), StablecoinError> {
    if PAUSED.load(storage)? {
        return Err(StablecoinError::Paused);
    }
    Ok(())
}

fn ensure_not_blacklisted(storage: &dyn Storage, accounts: &[&str]) -> Result<(), StablecoinError> {
    for account in accounts {
        if BLACKLIST.has(storage, *account) {
            return Err(StablecoinError::Blacklisted {
                address: account.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), StablecoinError> {
    if OWNER.load(storage)? != *sender {
        return Err(StablecoinError::Unauthorized);
    }
    Ok(())
}

fn base_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, StablecoinError> {
    Ok(cw20_base::contract::execute(deps, env, info, msg)?)
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, StablecoinError> {
    let sender = info.sender.to_string();
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            ensure_not_paused(deps.storage)?;
            ensure_not_blacklisted(deps.storage, &[sender.as_str(), recipient.as_str()])?;
            base_execute(deps, env, info, Cw20ExecuteMsg::Transfer { recipient, amount })
        }
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => {
            ensure_not_paused(deps.storage)?;
            ensure_not_blacklisted(
                deps.storage,
                &[sender.as_str(), owner.as_str(), recipient.as_str()],
            )?;
            base_execute(
                deps,
                env,
                info,
                Cw20ExecuteMsg::TransferFrom {
                    owner,
                    recipient,
                    amount,
                },
            )
        }
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => base_execute(
            deps,
            env,
            info,
            Cw20ExecuteMsg::IncreaseAllowance {
                spender,
                amount,
                expires,
            },
        ),
        ExecuteMsg::Mint { recipient, amount } => {
            ensure_not_paused(deps.storage)?;
            ensure_not_blacklisted(deps.storage, &[sender.as_str(), recipient.as_str()])?;
            base_execute(deps, env, info, Cw20ExecuteMsg::Mint { recipient, amount })
        }
        ExecuteMsg::Burn { amount } => {
            ensure_not_paused(deps.storage)?;
            ensure_not_blacklisted(deps.storage, &[sender.as_str()])?;
            base_execute(deps, env, info, Cw20ExecuteMsg::Burn { amount })
        }
        ExecuteMsg::ConfigureMinter { minter } => {
            if MASTER_MINTER.load(deps.storage)? != info.sender {
                return Err(StablecoinError::Unauthorized);
            }
            let minter = deps.api.addr_validate(&minter)?;
            TOKEN_INFO.update(deps.storage, |mut token| -> StdResult<_> {
                token.mint = Some(MinterData {
                    minter: minter.clone(),
                    cap: None,
                });
                Ok(token)
            })?;
            Ok(Response::new()
                .add_attribute("action", "configure_minter")
                .add_attribute("minter", minter))
        }
        ExecuteMsg::RemoveMinter { minter } => {
            let mut token = TOKEN_INFO.load(deps.storage)?;
            let current = token.mint.as_ref().map(|m| m.minter.to_string());
            if current.as_deref() != Some(minter.as_str()) {
                return Err(StablecoinError::NotMinter { address: minter });
            }
            // The master minter or the minter itself may revoke the role.
            if MASTER_MINTER.load(deps.storage)? != info.sender && sender != minter {
                return Err(StablecoinError::Unauthorized);
            }
            token.mint = None;
            TOKEN_INFO.save(deps.storage, &token)?;
            Ok(Response::new()
                .add_attribute("action", "remove_minter")
                .add_attribute("minter", minter))
        }
        ExecuteMsg::UpdateMasterMinter { new_master_minter } => {
            ensure_owner(deps.storage, &info.sender)?;
            let new_master_minter = deps.api.addr_validate(&new_master_minter)?;
            MASTER_MINTER.save(deps.storage, &new_master_minter)?;
            Ok(Response::new()
                .add_attribute("action", "update_master_minter")
                .add_attribute("master_minter", new_master_minter))
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            ensure_owner(deps.storage, &info.sender)?;
            let new_owner = deps.api.addr_validate(&new_owner)?;
            OWNER.save(deps.storage, &new_owner)?;
            Ok(Response::new()
                .add_attribute("action", "transfer_ownership")
                .add_attribute("owner", new_owner))
        }
        ExecuteMsg::ChangeAdmin { new_admin } => {
            ensure_owner(deps.storage, &info.sender)?;
            ADMIN.save(deps.storage, &new_admin)?;
            Ok(Response::new()
                .add_attribute("action", "change_admin")
                .add_attribute("admin", new_admin))
        }
        ExecuteMsg::Blacklist { account } => {
            ensure_owner(deps.storage, &info.sender)?;
            BLACKLIST.save(deps.storage, &account, &true)?;
            Ok(Response::new()
                .add_attribute("action", "blacklist")
                .add_attribute("account", account))
        }
        ExecuteMsg::Unblacklist { account } => {
            ensure_owner(deps.storage, &info.sender)?;
            BLACKLIST.remove(deps.storage, &account);
            Ok(Response::new()
                .add_attribute("action", "unblacklist")
                .add_attribute("account", account))
        }
        ExecuteMsg::Pause {} => {
            ensure_owner(deps.storage, &info.sender)?;
            PAUSED.save(deps.storage, &true)?;
            Ok(Response::new().add_attribute("action", "pause"))
        }
        ExecuteMsg::Unpause {} => {
            ensure_owner(deps.storage, &info.sender)?;
            PAUSED.save(deps.storage, &false)?;
            Ok(Response::new().add_attribute("action", "unpause"))
        }
    }
}

pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => {
            cw20_base::contract::query(deps, env, BaseQueryMsg::Balance { address })
        }
        QueryMsg::TokenInfo {} => cw20_base::contract::query(deps, env, BaseQueryMsg::TokenInfo {}),
        QueryMsg::Minter {} => cw20_base::contract::query(deps, env, BaseQueryMsg::Minter {}),
        QueryMsg::IsBlacklisted { address } => to_json_binary(&BlacklistedResponse {
            blacklisted: BLACKLIST.has(deps.storage, &address),
        }),
        QueryMsg::Roles {} => to_json_binary(&RolesResponse {
            owner: OWNER.load(deps.storage)?.to_string(),
            master_minter: MASTER_MINTER.load(deps.storage)?.to_string(),
            admin: ADMIN.may_load(deps.storage)?,
            paused: PAUSED.load(deps.storage)?,
        }),
        QueryMsg::UpgradeInfo {} => to_json_binary(&UpgradeInfoResponse {
            migrations: MIGRATIONS.load(deps.storage)?,
            last_note: LAST_NOTE.may_load(deps.storage)?,
        }),
    }
}

pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, StablecoinError> {
    let migrations = MIGRATIONS.may_load(deps.storage)?.unwrap_or_default() + 1;
    MIGRATIONS.save(deps.storage, &migrations)?;
    if let Some(note) = &msg.note {
        LAST_NOTE.save(deps.storage, note)?;
    }
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("migrations", migrations.to_string()))
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query).with_migrate(migrate))
}
