//! Shared setup for home adapter integration tests.
//!
//! The remote side is simulated: `relay` delivers payloads through the local
//! messenger as if they came from `REMOTE_ADAPTER`, and outbound payloads are
//! read back from the messenger outbox.

#![allow(dead_code)]

use common::relay::{HomeRelayMsg, RemoteRelayMsg};
use common::AdapterStatus;
use cosmwasm_std::{from_json, to_json_binary, Addr, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use mocks::messenger::{self, OutboxResponse, SentMessage};
use mocks::stablecoin;

use home_adapter::msg::{
    ExecuteMsg, InstantiateMsg, LockedFundsResponse, MigrationResponse, QueryMsg, StatusResponse,
};

pub const REMOTE_ADAPTER: &str = "terra1remoteadapter";
pub const BOUNCE_GAS: u32 = 150_000;
pub const INITIAL_BALANCE: u128 = 1_000_000;

pub fn contract_home_adapter() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        home_adapter::contract::execute,
        home_adapter::contract::instantiate,
        home_adapter::contract::query,
    )
    .with_reply(home_adapter::contract::reply)
    .with_migrate(home_adapter::contract::migrate);
    Box::new(contract)
}

pub struct TestEnv {
    pub app: App,
    pub adapter: Addr,
    pub token: Addr,
    pub messenger: Addr,
    pub owner: Addr,
    pub user: Addr,
    pub relay_nonce: u64,
}

pub fn setup() -> TestEnv {
    setup_with_link(Some(REMOTE_ADAPTER.to_string()))
}

pub fn setup_with_link(linked_adapter: Option<String>) -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");

    let messenger_code = app.store_code(messenger::contract());
    let token_code = app.store_code(stablecoin::contract());
    let adapter_code = app.store_code(contract_home_adapter());

    let messenger = app
        .instantiate_contract(
            messenger_code,
            owner.clone(),
            &messenger::InstantiateMsg {},
            &[],
            "home-messenger",
            None,
        )
        .unwrap();

    let token = app
        .instantiate_contract(
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
                linked_adapter,
                bounce_min_gas_limit: BOUNCE_GAS,
            },
            &[],
            "home-adapter",
            Some(owner.to_string()),
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
        messenger,
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

    /// Deliver `msg` as if relayed from `sender` on the remote chain.
    pub fn relay_from(&mut self, sender: &str, msg: &HomeRelayMsg) -> anyhow::Result<AppResponse> {
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

    pub fn relay(&mut self, msg: &HomeRelayMsg) -> anyhow::Result<AppResponse> {
        self.relay_from(REMOTE_ADAPTER, msg)
    }

    pub fn token_execute(&mut self, msg: &stablecoin::ExecuteMsg) {
        self.app
            .execute_contract(self.owner.clone(), self.token.clone(), msg, &[])
            .unwrap();
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

    /// Last payload queued for the remote adapter.
    pub fn last_sent(&self) -> (SentMessage, RemoteRelayMsg) {
        let sent = self.outbox().pop().expect("outbox is empty");
        assert_eq!(sent.sender, self.adapter.to_string());
        assert_eq!(sent.target, REMOTE_ADAPTER);
        let payload = from_json(&sent.message).unwrap();
        (sent, payload)
    }

    /// Escrow some funds, then drive the adapter to `Deprecated` with the
    /// given remote supply snapshot.
    pub fn deprecate(&mut self, burn_caller: &Addr, snapshot: u128) {
        self.execute_as_owner(&ExecuteMsg::MigrateToNative {
            role_caller: "terra1rolecaller".to_string(),
            burn_caller: burn_caller.to_string(),
            receive_min_gas_limit: 300_000,
            set_burn_amount_min_gas_limit: 100_000,
        })
        .unwrap();
        self.relay(&HomeRelayMsg::SetBurnAmount {
            amount: Uint128::new(snapshot),
        })
        .unwrap();
    }
}
