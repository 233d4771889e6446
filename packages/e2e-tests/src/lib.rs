//! Two-chain test suite for the stablecoin bridge adapters.
//!
//! Both chains live in one `cw-multi-test` `App`. Each side has its own mock
//! messenger; `relay_to_remote` and `relay_to_home` read the outbox of one
//! messenger and deliver every new message through the other, the way an
//! off-chain relayer would.

use common::AdapterStatus;
use cosmwasm_std::{to_json_binary, Addr, Empty, StdResult, Uint128};
use cw20::{BalanceResponse, Cw20Coin, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use mocks::messenger::{self, OutboxResponse, SentMessage};
use mocks::{proxy_admin, stablecoin};

pub const INITIAL_BALANCE: u128 = 1_000_000;
pub const BOUNCE_GAS: u32 = 150_000;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_home_adapter() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            home_adapter::contract::execute,
            home_adapter::contract::instantiate,
            home_adapter::contract::query,
        )
        .with_reply(home_adapter::contract::reply)
        .with_migrate(home_adapter::contract::migrate),
    )
}

pub fn contract_remote_adapter() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            remote_adapter::contract::execute,
            remote_adapter::contract::instantiate,
            remote_adapter::contract::query,
        )
        .with_reply(remote_adapter::contract::reply)
        .with_migrate(remote_adapter::contract::migrate),
    )
}

// ============================================================================
// Suite
// ============================================================================

pub struct BridgeSuite {
    pub app: App,
    pub owner: Addr,
    pub user: Addr,
    pub token_code: u64,

    pub home_token: Addr,
    pub home_messenger: Addr,
    pub home_adapter: Addr,

    pub remote_token: Addr,
    pub remote_messenger: Addr,
    pub remote_adapter: Addr,
    pub proxy_admin: Addr,

    /// Last home outbox nonce delivered on the remote chain
    home_cursor: Option<u64>,
    /// Last remote outbox nonce delivered on the home chain
    remote_cursor: Option<u64>,
}

impl BridgeSuite {
    /// Deploy and link both sides. `user` holds `INITIAL_BALANCE` of the home
    /// token and has approved both adapters.
    pub fn new() -> anyhow::Result<Self> {
        let mut app = App::default();
        let owner = Addr::unchecked("terra1owner");
        let user = Addr::unchecked("terra1user");

        let messenger_code = app.store_code(messenger::contract());
        let proxy_admin_code = app.store_code(proxy_admin::contract());
        let token_code = app.store_code(stablecoin::contract());
        let home_code = app.store_code(contract_home_adapter());
        let remote_code = app.store_code(contract_remote_adapter());

        // Home chain
        let home_messenger = app.instantiate_contract(
            messenger_code,
            owner.clone(),
            &messenger::InstantiateMsg {},
            &[],
            "home-messenger",
            None,
        )?;
        let home_token = app.instantiate_contract(
            token_code,
            owner.clone(),
            &stablecoin::InstantiateMsg {
                name: "Euro Coin".to_string(),
                symbol: "EURC".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: user.to_string(),
                    amount: Uint128::new(INITIAL_BALANCE),
                }],
                minter: None,
                owner: owner.to_string(),
                master_minter: owner.to_string(),
            },
            &[],
            "eurc",
            Some(owner.to_string()),
        )?;
        let home_adapter = app.instantiate_contract(
            home_code,
            owner.clone(),
            &home_adapter::msg::InstantiateMsg {
                owner: owner.to_string(),
                token: home_token.to_string(),
                messenger: home_messenger.to_string(),
                linked_adapter: None,
                bounce_min_gas_limit: BOUNCE_GAS,
            },
            &[],
            "home-adapter",
            Some(owner.to_string()),
        )?;

        // Remote chain
        let remote_messenger = app.instantiate_contract(
            messenger_code,
            owner.clone(),
            &messenger::InstantiateMsg {},
            &[],
            "remote-messenger",
            None,
        )?;
        let proxy_admin = app.instantiate_contract(
            proxy_admin_code,
            owner.clone(),
            &proxy_admin::InstantiateMsg {
                owner: owner.to_string(),
            },
            &[],
            "proxy-admin",
            None,
        )?;
        let remote_token = app.instantiate_contract(
            token_code,
            owner.clone(),
            &stablecoin::InstantiateMsg {
                name: "Bridged Euro Coin".to_string(),
                symbol: "EURCE".to_string(),
                decimals: 6,
                initial_balances: vec![],
                minter: None,
                owner: owner.to_string(),
                master_minter: owner.to_string(),
            },
            &[],
            "eurc-bridged",
            Some(proxy_admin.to_string()),
        )?;
        let remote_adapter = app.instantiate_contract(
            remote_code,
            owner.clone(),
            &remote_adapter::msg::InstantiateMsg {
                owner: owner.to_string(),
                token: remote_token.to_string(),
                messenger: remote_messenger.to_string(),
                proxy_admin: proxy_admin.to_string(),
                linked_adapter: Some(home_adapter.to_string()),
                bounce_min_gas_limit: BOUNCE_GAS,
            },
            &[],
            "remote-adapter",
            Some(owner.to_string()),
        )?;

        // Hand the bridged token over to the remote adapter.
        for msg in [
            stablecoin::ExecuteMsg::ConfigureMinter {
                minter: remote_adapter.to_string(),
            },
            stablecoin::ExecuteMsg::TransferOwnership {
                new_owner: remote_adapter.to_string(),
            },
        ] {
            app.execute_contract(owner.clone(), remote_token.clone(), &msg, &[])?;
        }
        app.execute_contract(
            owner.clone(),
            proxy_admin.clone(),
            &proxy_admin::ExecuteMsg::TransferOwnership {
                new_owner: remote_adapter.to_string(),
            },
            &[],
        )?;

        // The remote address is only known now.
        app.execute_contract(
            owner.clone(),
            home_adapter.clone(),
            &home_adapter::msg::ExecuteMsg::SetLinkedAdapter {
                linked_adapter: remote_adapter.to_string(),
            },
            &[],
        )?;

        for (token, spender) in [(&home_token, &home_adapter), (&remote_token, &remote_adapter)] {
            app.execute_contract(
                user.clone(),
                token.clone(),
                &stablecoin::ExecuteMsg::IncreaseAllowance {
                    spender: spender.to_string(),
                    amount: Uint128::new(u128::MAX / 2),
                    expires: None,
                },
                &[],
            )?;
        }

        Ok(Self {
            app,
            owner,
            user,
            token_code,
            home_token,
            home_messenger,
            home_adapter,
            remote_token,
            remote_messenger,
            remote_adapter,
            proxy_admin,
            home_cursor: None,
            remote_cursor: None,
        })
    }

    // ========================================================================
    // Execution
    // ========================================================================

    pub fn home_execute(
        &mut self,
        sender: &Addr,
        msg: &home_adapter::msg::ExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.home_adapter.clone(), msg, &[])
    }

    pub fn remote_execute(
        &mut self,
        sender: &Addr,
        msg: &remote_adapter::msg::ExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.remote_adapter.clone(), msg, &[])
    }

    pub fn home_token_execute(&mut self, msg: &stablecoin::ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(self.owner.clone(), self.home_token.clone(), msg, &[])
    }

    /// Remote token administration goes through the adapter passthrough.
    pub fn remote_token_execute(
        &mut self,
        msg: &stablecoin::ExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        let owner = self.owner.clone();
        self.remote_execute(
            &owner,
            &remote_adapter::msg::ExecuteMsg::CallTokenTransaction {
                msg: to_json_binary(msg)?,
            },
        )
    }

    // ========================================================================
    // Relaying
    // ========================================================================

    /// Messages queued on the home chain and not yet delivered.
    pub fn pending_to_remote(&self) -> anyhow::Result<Vec<SentMessage>> {
        self.outbox_after(&self.home_messenger, self.home_cursor)
    }

    /// Messages queued on the remote chain and not yet delivered.
    pub fn pending_to_home(&self) -> anyhow::Result<Vec<SentMessage>> {
        self.outbox_after(&self.remote_messenger, self.remote_cursor)
    }

    /// Deliver every pending home message on the remote chain. Stops at the
    /// first failing delivery, which stays pending.
    pub fn relay_to_remote(&mut self) -> anyhow::Result<usize> {
        let pending = self.pending_to_remote()?;
        let destination = self.remote_messenger.clone();
        for sent in &pending {
            self.deliver(&destination, sent)?;
            self.home_cursor = Some(sent.nonce);
        }
        Ok(pending.len())
    }

    /// Deliver every pending remote message on the home chain.
    pub fn relay_to_home(&mut self) -> anyhow::Result<usize> {
        let pending = self.pending_to_home()?;
        let destination = self.home_messenger.clone();
        for sent in &pending {
            self.deliver(&destination, sent)?;
            self.remote_cursor = Some(sent.nonce);
        }
        Ok(pending.len())
    }

    /// Skip the next pending home message, as if the relay dropped it.
    pub fn drop_next_to_remote(&mut self) -> anyhow::Result<Option<SentMessage>> {
        let next = self.pending_to_remote()?.into_iter().next();
        if let Some(sent) = &next {
            self.home_cursor = Some(sent.nonce);
        }
        Ok(next)
    }

    /// Deliver `sent` again on the remote chain under a fresh relay nonce.
    pub fn redeliver_to_remote(&mut self, sent: &SentMessage) -> anyhow::Result<AppResponse> {
        let destination = self.remote_messenger.clone();
        let replay = SentMessage {
            nonce: sent.nonce + 1_000_000,
            ..sent.clone()
        };
        self.deliver(&destination, &replay)
    }

    fn deliver(&mut self, destination: &Addr, sent: &SentMessage) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked("terra1relayer"),
            destination.clone(),
            &messenger::ExecuteMsg::RelayMessage {
                nonce: sent.nonce,
                sender: sent.sender.clone(),
                target: sent.target.clone(),
                message: sent.message.clone(),
            },
            &[],
        )
    }

    fn outbox_after(
        &self,
        messenger: &Addr,
        cursor: Option<u64>,
    ) -> anyhow::Result<Vec<SentMessage>> {
        let res: OutboxResponse = self.app.wrap().query_wasm_smart(
            messenger,
            &messenger::QueryMsg::Outbox {
                start_after: cursor,
                limit: Some(100),
            },
        )?;
        Ok(res.messages)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn home_balance(&self, address: &str) -> StdResult<Uint128> {
        self.balance(&self.home_token, address)
    }

    pub fn remote_balance(&self, address: &str) -> StdResult<Uint128> {
        self.balance(&self.remote_token, address)
    }

    pub fn remote_supply(&self) -> StdResult<Uint128> {
        let info: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.remote_token, &stablecoin::QueryMsg::TokenInfo {})?;
        Ok(info.total_supply)
    }

    pub fn home_status(&self) -> StdResult<AdapterStatus> {
        let res: home_adapter::msg::StatusResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.home_adapter, &home_adapter::msg::QueryMsg::Status {})?;
        Ok(res.status)
    }

    pub fn remote_status(&self) -> StdResult<AdapterStatus> {
        let res: remote_adapter::msg::StatusResponse = self.app.wrap().query_wasm_smart(
            &self.remote_adapter,
            &remote_adapter::msg::QueryMsg::Status {},
        )?;
        Ok(res.status)
    }

    pub fn home_locked(&self, spender: &str, user: &str) -> StdResult<Uint128> {
        let res: home_adapter::msg::LockedFundsResponse = self.app.wrap().query_wasm_smart(
            &self.home_adapter,
            &home_adapter::msg::QueryMsg::LockedFunds {
                spender: spender.to_string(),
                user: user.to_string(),
            },
        )?;
        Ok(res.amount)
    }

    pub fn remote_locked(&self, spender: &str, user: &str) -> StdResult<Uint128> {
        let res: remote_adapter::msg::LockedFundsResponse = self.app.wrap().query_wasm_smart(
            &self.remote_adapter,
            &remote_adapter::msg::QueryMsg::LockedFunds {
                spender: spender.to_string(),
                user: user.to_string(),
            },
        )?;
        Ok(res.amount)
    }

    fn balance(&self, token: &Addr, address: &str) -> StdResult<Uint128> {
        let res: BalanceResponse = self.app.wrap().query_wasm_smart(
            token,
            &stablecoin::QueryMsg::Balance {
                address: address.to_string(),
            },
        )?;
        Ok(res.balance)
    }
}
