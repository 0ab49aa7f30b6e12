//! The Lighthouse beacon-node HTTP API.
//!
//! Hook it up with [`Eth2HttpClient::extended_api`](crate::http::Eth2HttpClient::extended_api).

use std::sync::Arc;

use crate::core::Method;
use crate::error::DeclarationError;
use crate::obj::{ObjDict, ObjList, ObjMap, ObjType, ToObj};
use crate::route::{Arg, ResponseType, RouteModel, api};
use crate::{obj_struct, ssz_container};

use super::CONSENSUS_FORMATS;
use super::primitives::{
    BlsPubkey, CommitteeIndex, Epoch, Fork, Gwei, ProposerSlashing, Root, Slot, Validator, ValidatorIndex,
    rooted_container,
};

pub use super::primitives::{ApiState, HeadInfo};

rooted_container!(
    /// A signed beacon block with its block root.
    ApiBlock { beacon_block }
);

ssz_container! {
    pub struct HeadRef {
        pub beacon_block_root: Root,
        pub beacon_block_slot: Slot,
    }
}

pub type HeadRefs = ObjList<HeadRef>;

obj_struct! {
    pub struct CommitteeInfo {
        pub slot: Slot,
        pub index: CommitteeIndex,
        pub committee: ObjList<ValidatorIndex>,
    }
}

pub type Shuffling = ObjList<CommitteeInfo>;

/// Body of the validators lookup. `state_root` is left out when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorsQuery {
    pub state_root: Option<Root>,
    pub pubkeys: Vec<BlsPubkey>,
}

impl ToObj for ValidatorsQuery {
    fn to_obj(&self) -> ObjType {
        let mut query = ObjMap::new();
        query.insert(
            "pubkeys".to_string(),
            ObjType::Array(self.pubkeys.iter().map(ToObj::to_obj).collect()),
        );
        if let Some(state_root) = &self.state_root {
            query.insert("state_root".to_string(), state_root.to_obj());
        }
        ObjType::Object(query)
    }
}

impl From<ValidatorsQuery> for Arg {
    fn from(value: ValidatorsQuery) -> Self {
        Arg::obj(value)
    }
}

ssz_container! {
    pub struct ValidatorInfo {
        pub pubkey: BlsPubkey,
        pub validator_index: ValidatorIndex,
        pub balance: Gwei,
        pub validator: Validator,
    }
}

pub type ValidatorInfos = ObjList<ValidatorInfo>;

obj_struct! {
    pub struct GlobalVotes {
        pub current_epoch_active_gwei: u64,
        pub previous_epoch_active_gwei: u64,
        pub current_epoch_attesting_gwei: u64,
        pub current_epoch_target_attesting_gwei: u64,
        pub previous_epoch_attesting_gwei: u64,
        pub previous_epoch_target_attesting_gwei: u64,
        pub previous_epoch_head_attesting_gwei: u64,
    }
}

obj_struct! {
    pub struct VoteQuery {
        pub epoch: Epoch,
        pub pubkeys: ObjList<BlsPubkey>,
    }
}

obj_struct! {
    pub struct VoteInfo {
        pub is_slashed: bool,
        pub is_withdrawable_in_current_epoch: bool,
        pub is_active_in_current_epoch: bool,
        pub is_active_in_previous_epoch: bool,
        pub current_epoch_effective_balance_gwei: u64,
        pub is_current_epoch_attester: bool,
        pub is_current_epoch_target_attester: bool,
        pub is_previous_epoch_attester: bool,
        pub is_previous_epoch_target_attester: bool,
        pub is_previous_epoch_head_attester: bool,
    }
}

obj_struct! {
    pub struct VoteEntry {
        pub epoch: Epoch,
        pub pubkey: BlsPubkey,
        pub validator_index: ValidatorIndex,
        pub vote: VoteInfo,
    }
}

obj_struct! {
    pub struct ForkchoiceNode {
        pub slot: Slot,
        pub state_root: Root,
        pub root: Root,
        pub parent: Option<u64>,
        pub justified_epoch: Epoch,
        pub finalized_epoch: Epoch,
        pub weight: Gwei,
        pub best_child: Option<u64>,
        pub best_descendant: Option<u64>,
    }
}

obj_struct! {
    pub struct ForkchoiceData {
        pub prune_threshold: u64,
        pub justified_epoch: u64,
        pub finalized_epoch: u64,
        pub nodes: ObjList<ForkchoiceNode>,
        pub indices: ObjDict<Root, u64>,
    }
}

obj_struct! {
    /// Pending operations. Only proposer slashings are decoded field by field.
    pub struct OperationPool {
        pub attestations: ObjList<ObjType>,
        pub attester_slashings: ObjList<ObjType>,
        pub proposer_slashings: ObjList<ProposerSlashing>,
        pub voluntary_exits: ObjList<ObjType>,
    }
}

pub fn beacon_api() -> Result<Arc<RouteModel>, DeclarationError> {
    let ssz_api = |name: &str| api(name).supports(CONSENSUS_FORMATS);
    RouteModel::builder("BeaconAPI")
        .endpoint(ssz_api("head").returns(ResponseType::ssz::<HeadInfo>()).build()?)
        .endpoint(api("heads").returns(ResponseType::obj::<HeadRefs>()).build()?)
        .endpoint(
            ssz_api("block")
                .params(&["root", "slot"])
                .returns(ResponseType::ssz::<ApiBlock>())
                .build()?,
        )
        .endpoint(ssz_api("block_root").params(&["slot"]).returns(ResponseType::ssz::<Root>()).build()?)
        .endpoint(api("committees").params(&["epoch"]).returns(ResponseType::obj::<Shuffling>()).build()?)
        .endpoint(ssz_api("fork").returns(ResponseType::ssz::<Fork>()).build()?)
        .endpoint(ssz_api("genesis_time").returns(ResponseType::ssz::<u64>()).build()?)
        .endpoint(ssz_api("genesis_validators_root").returns(ResponseType::ssz::<Root>()).build()?)
        .endpoint(
            ssz_api("validators")
                .method(Method::Post)
                .params(&["query"])
                .data("query")
                .returns(ResponseType::ssz::<ValidatorInfos>())
                .build()?,
        )
        .endpoint(
            ssz_api("validators_all")
                .name("validators/all")
                .params(&["state_root"])
                .returns(ResponseType::ssz::<ValidatorInfos>())
                .build()?,
        )
        .endpoint(
            ssz_api("active")
                .name("validators/active")
                .params(&["state_root"])
                .returns(ResponseType::ssz::<ValidatorInfos>())
                .build()?,
        )
        .endpoint(
            ssz_api("state")
                .params(&["root", "slot"])
                .returns(ResponseType::ssz::<ApiState>())
                .build()?,
        )
        .endpoint(ssz_api("state_root").params(&["slot"]).returns(ResponseType::ssz::<Root>()).build()?)
        .endpoint(
            ssz_api("state_genesis")
                .name("state/genesis")
                .returns(ResponseType::ssz::<ApiState>())
                .build()?,
        )
        .endpoint(
            ssz_api("post_attester_slashing")
                .method(Method::Post)
                .name("attester_slashing")
                .params(&["slashing"])
                .data("slashing")
                .build()?,
        )
        .endpoint(
            ssz_api("post_proposer_slashing")
                .method(Method::Post)
                .name("proposer_slashing")
                .params(&["slashing"])
                .data("slashing")
                .build()?,
        )
        .build()
}

pub fn consensus_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("ConsensusAPI")
        .endpoint(api("global_votes").returns(ResponseType::obj::<GlobalVotes>()).build()?)
        .endpoint(
            api("individual_votes")
                .method(Method::Post)
                .params(&["query"])
                .data("query")
                .returns(ResponseType::obj::<ObjList<VoteEntry>>())
                .build()?,
        )
        .build()
}

pub fn network_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("NetworkAPI")
        .endpoint(api("enr").returns(ResponseType::obj::<String>()).build()?)
        .endpoint(api("peer_count").returns(ResponseType::obj::<u64>()).build()?)
        .endpoint(api("peer_id").returns(ResponseType::obj::<String>()).build()?)
        .endpoint(api("peers").returns(ResponseType::obj::<ObjList<String>>()).build()?)
        .endpoint(api("listen_port").returns(ResponseType::obj::<u16>()).build()?)
        .endpoint(api("listen_addresses").returns(ResponseType::obj::<ObjList<String>>()).build()?)
        .build()
}

pub fn advanced_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("AdvancedAPI")
        .endpoint(api("fork_choice").returns(ResponseType::obj::<ForkchoiceData>()).build()?)
        .endpoint(api("operation_pool").returns(ResponseType::obj::<OperationPool>()).build()?)
        .build()
}

/// Root of the Lighthouse API.
pub fn eth2_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("LighthouseAPI")
        .route("beacon", beacon_api()?)
        .route("consensus", consensus_api()?)
        .route("network", network_api()?)
        .route("advanced", advanced_api()?)
        .build()
}
