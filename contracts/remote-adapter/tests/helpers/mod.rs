//! Shared setup for remote adapter integration tests.
//!
//! The adapter is the token's minter and owns both the token and its proxy
//! admin, as in a real deployment. Token administration in tests therefore
//! goes through `CallTokenTransaction`.

#![allow(dead_code)]

use common::relay::{HomeRelayMsg, RemoteRelayMsg};
use common::AdapterStatus;
use cosmwasm_std::{from_json, to_json_binary, Addr, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use mocks::messenger::{self, OutboxResponse, SentMessage};
use mocks::{proxy_admin, stablecoin};

use remote_adapter::msg::{
    ExecuteMsg, InstantiateMsg, LockedFundsResponse, MigrationResponse, QueryMsg, StatusResponse,
};

pub const HOME_ADAPTER: &str = "terra1homeadapter";
pub const BOUNCE_GAS: u32 = 150_000;
pub const INITIAL_BALANCE: u128 = 1_000_000;

pub fn contract_remote_adapter() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        remote_adapter::contract::execute,
        remote_adapter::contract::instantiate,
        remote_adapter::contract::query,
    )
    .with_reply(remote_adapter::contract::reply)
    .with_migrate(remote_adapter::contract::migrate);
    Box::new(contract)
}

pub struct TestEnv {
    pub app: App,
    pub adapter: Addr,
    pub token: Addr,
    pub token_code: u64,
    pub messenger: Addr,
    pub proxy_admin: Addr,
    pub owner: Addr,
    pub user: Addr,
    pub relay_nonce: u64,
}

pub fn setup() -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");

    let messenger_code = app.store_code(messenger::contract());
    let proxy_admin_code = app.store_code(proxy_admin::contract());
    let token_code = app.store_code(stablecoin::contract());
    let adapter_code = app.store_code(contract_remote_adapter());

    let messenger = app
        .instantiate_contract(
            messenger_code,
            owner.clone(),
            &messenger::InstantiateMsg {},
            &[],
            "remote-messenger",
            None,
        )
        .unwrap();

    let proxy_admin = app
        .instantiate_contract(
            proxy_admin_code,
            owner.clone(),
            &proxy_admin::InstantiateMsg {
                owner: owner.to_string(),
            },
            &[],
            "proxy-admin",
            None,
        )
        .unwrap();

    // Bridged supply that was minted before the test starts.
    let token = app
        .instantiate_contract(
            token_code,
            owner.clone(),
            &stablecoin::InstantiateMsg {
                name: "Bridged Euro Coin".to_string(),
                symbol: "EURCE".to_string(),
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
            "eurc-bridged",
            Some(proxy_admin.to_string()),
        )
        .unwrap();

    let adapter = app
        .instantiate_contract(
            adapter_code,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                token: token.to_string(),
                messenger: messenger.to_string(),
                proxy_admin: proxy_admin.to_string(),
                linked_adapter: Some(HOME_ADAPTER.to_string()),
                bounce_min_gas_limit: BOUNCE_GAS,
            },
            &[],
            "remote-adapter",
            Some(owner.to_string()),
        )
        .unwrap();

    for msg in [
        stablecoin::ExecuteMsg::ConfigureMinter {
            minter: adapter.to_string(),
        },
        stablecoin::ExecuteMsg::TransferOwnership {
            new_owner: adapter.to_string(),
        },
    ] {
        app.execute_contract(owner.clone(), token.clone(), &msg, &[])
            .unwrap();
    }
    app.execute_contract(
        owner.clone(),
        proxy_admin.clone(),
        &proxy_admin::ExecuteMsg::TransferOwnership {
            new_owner: adapter.to_string(),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        user.clone(),
        token.clone(),
        &stablecoin::ExecuteMsg::IncreaseAllowance {
            spender: adapter.to_string(),
            amount: Uint128::new(INITIAL_BALANCE),
            expires: None,
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        adapter,
        token,
        token_code,
        messenger,
        proxy_admin,
        owner,
        user,
        relay_nonce: 0,
    }
}

impl TestEnv {
    pub fn send(&mut self, to: &str, amount: u128) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.user.clone(),
            self.adapter.clone(),
            &ExecuteMsg::SendMessage {
                to: to.to_string(),
                amount: Uint128::new(amount),
                min_gas_limit: 200_000,
            },
            &[],
        )
    }

    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.adapter.clone(), msg, &[])
    }

    pub fn execute_as_owner(&mut self, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        let owner = self.owner.clone();
        self.execute(&owner, msg)
    }

    /// Token administration through the owner passthrough.
    pub fn token_admin(&mut self, msg: &stablecoin::ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.execute_as_owner(&ExecuteMsg::CallTokenTransaction {
            msg: to_json_binary(msg).unwrap(),
        })
    }

    /// Deliver `msg` as if relayed from `sender` on the home chain.
    pub fn relay_from(
        &mut self,
        sender: &str,
        msg: &RemoteRelayMsg,
    ) -> anyhow::Result<AppResponse> {
        let nonce = self.relay_nonce;
        self.relay_nonce += 1;
        self.app.execute_contract(
            Addr::unchecked("terra1relayer"),
            self.messenger.clone(),
            &messenger::ExecuteMsg::RelayMessage {
                nonce,
                sender: sender.to_string(),
                target: self.adapter.to_string(),
                message: to_json_binary(msg).unwrap(),
            },
            &[],
        )
    }

    pub fn relay(&mut self, msg: &RemoteRelayMsg) -> anyhow::Result<AppResponse> {
        self.relay_from(HOME_ADAPTER, msg)
    }

    pub fn balance(&self, address: &str) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &stablecoin::QueryMsg::Balance {
                    address: address.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn total_supply(&self) -> Uint128 {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.token, &stablecoin::QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply
    }

    pub fn roles(&self) -> stablecoin::RolesResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.token, &stablecoin::QueryMsg::Roles {})
            .unwrap()
    }

    pub fn status(&self) -> AdapterStatus {
        let res: StatusResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.adapter, &QueryMsg::Status {})
            .unwrap();
        res.status
    }

    pub fn locked(&self, spender: &str, user: &str) -> Uint128 {
        let res: LockedFundsResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.adapter,
                &QueryMsg::LockedFunds {
                    spender: spender.to_string(),
                    user: user.to_string(),
                },
            )
            .unwrap();
        res.amount
    }

    pub fn migration(&self) -> MigrationResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.adapter, &QueryMsg::Migration {})
            .unwrap()
    }

    pub fn outbox(&self) -> Vec<SentMessage> {
        let res: OutboxResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.messenger,
                &messenger::QueryMsg::Outbox {
                    start_after: None,
                    limit: Some(100),
                },
            )
            .unwrap();
        res.messages
    }

    /// Last payload queued for the home adapter.
    pub fn last_sent(&self) -> (SentMessage, HomeRelayMsg) {
        let sent = self.outbox().pop().expect("outbox is empty");
        assert_eq!(sent.sender, self.adapter.to_string());
        assert_eq!(sent.target, HOME_ADAPTER);
        let payload = from_json(&sent.message).unwrap();
        (sent, payload)
    }

    /// Deliver the migration trigger with the default role caller.
    pub fn deprecate(&mut self) -> anyhow::Result<AppResponse> {
        self.relay(&RemoteRelayMsg::ReceiveMigrateToNative {
            role_caller: "terra1rolecaller".to_string(),
            set_burn_amount_min_gas_limit: 100_000,
        })
    }
}
