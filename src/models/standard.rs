//! The standard beacon-node API.
//!
//! ```text
//! /beacon/states/{head,finalized,justified,genesis}/{root,fork,validators}
//! /beacon/states/state_root/<root>/...
//! /beacon/states/slot/<slot>/...
//! /beacon/states/<state>/validators[/pubkey/<key> | /index/<index>]
//! /beacon/{block,state,head,proposer_slashing}
//! /network/enr
//! ```

use std::fmt;
use std::sync::Arc;

use crate::core::Method;
use crate::error::DeclarationError;
use crate::obj::{CodecError, FromObj, ObjList, ObjType, ToObj, kind};
use crate::obj_struct;
use crate::route::{ResponseType, RouteModel, RouteModelBuilder, api, var_path};

use super::CONSENSUS_FORMATS;
use super::primitives::{Fork, Gwei, Root, Validator, rooted_container};

pub use super::primitives::{ApiState, HeadInfo};

rooted_container!(
    /// A signed beacon block with its block root.
    ApiBlock { block }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorStatus {
    Slashed,
    ActivationQueue,
    Active,
    ExitQueue,
    Exited,
    Withdrawable,
}

impl ValidatorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorStatus::Slashed => "slashed",
            ValidatorStatus::ActivationQueue => "activation_queue",
            ValidatorStatus::Active => "active",
            ValidatorStatus::ExitQueue => "exit_queue",
            ValidatorStatus::Exited => "exited",
            ValidatorStatus::Withdrawable => "withdrawable",
        }
    }
}

impl fmt::Display for ValidatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToObj for ValidatorStatus {
    fn to_obj(&self) -> ObjType {
        ObjType::String(self.as_str().to_string())
    }
}

impl FromObj for ValidatorStatus {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        let status = match &obj {
            ObjType::String(s) => s.as_str(),
            other => {
                return Err(CodecError::InvalidValue {
                    expected: "validator status",
                    got: kind(other).to_string(),
                });
            },
        };
        match status {
            "slashed" => Ok(ValidatorStatus::Slashed),
            "activation_queue" => Ok(ValidatorStatus::ActivationQueue),
            "active" => Ok(ValidatorStatus::Active),
            "exit_queue" => Ok(ValidatorStatus::ExitQueue),
            "exited" => Ok(ValidatorStatus::Exited),
            "withdrawable" => Ok(ValidatorStatus::Withdrawable),
            other => Err(CodecError::InvalidValue {
                expected: "validator status",
                got: other.to_string(),
            }),
        }
    }
}

obj_struct! {
    pub struct ValidatorInfo {
        pub validator: Validator,
        pub status: ValidatorStatus,
        pub balance: Gwei,
    }
}

pub type ValidatorInfoList = ObjList<ValidatorInfo>;

/// Routes that select a state: named states plus `state_root` and `slot` segments.
pub fn state_id(target: Arc<RouteModel>) -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("StateID")
        .route("head", target.clone())
        .route("finalized", target.clone())
        .route("justified", target.clone())
        .route("genesis", target.clone())
        .var_path(var_path("state_root").params(&["value"]).returns(target.clone()).build()?)
        .var_path(var_path("slot").params(&["value"]).returns(target).build()?)
        .build()
}

/// Adds the `pubkey` and `index` validator segments to a model.
fn with_validator_id(
    builder: RouteModelBuilder,
    target: Arc<RouteModel>,
) -> Result<RouteModelBuilder, DeclarationError> {
    Ok(builder
        .var_path(var_path("pubkey").params(&["value"]).returns(target.clone()).build()?)
        .var_path(var_path("index").params(&["value"]).returns(target).build()?))
}

pub fn beacon_state_validator_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("BeaconStateValidatorAPI")
        .call_endpoint(api("validator").returns(ResponseType::obj::<ValidatorInfo>()).build()?)
        .build()
}

/// Callable itself (all validators, filtered by `validatorIds`) and by validator.
pub fn beacon_state_validators_api() -> Result<Arc<RouteModel>, DeclarationError> {
    let builder = RouteModel::builder("BeaconStateValidatorsAPI").call_endpoint(
        api("validators")
            .params(&["validatorIds"])
            .returns(ResponseType::obj::<ValidatorInfoList>())
            .build()?,
    );
    with_validator_id(builder, beacon_state_validator_api()?)?.build()
}

pub fn beacon_state_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("BeaconStateAPI")
        .endpoint(api("root").supports(CONSENSUS_FORMATS).returns(ResponseType::ssz::<Root>()).build()?)
        .endpoint(api("fork").supports(CONSENSUS_FORMATS).returns(ResponseType::ssz::<Fork>()).build()?)
        .route("validators", beacon_state_validators_api()?)
        .build()
}

pub fn beacon_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("BeaconAPI")
        .route("states", state_id(beacon_state_api()?)?)
        .endpoint(
            api("block")
                .params(&["root", "slot"])
                .supports(CONSENSUS_FORMATS)
                .returns(ResponseType::ssz::<ApiBlock>())
                .build()?,
        )
        .endpoint(
            api("state")
                .params(&["root", "slot"])
                .supports(CONSENSUS_FORMATS)
                .returns(ResponseType::ssz::<ApiState>())
                .build()?,
        )
        .endpoint(api("head").supports(CONSENSUS_FORMATS).returns(ResponseType::ssz::<HeadInfo>()).build()?)
        .endpoint(
            api("post_proposer_slashing")
                .method(Method::Post)
                .supports(CONSENSUS_FORMATS)
                .name("proposer_slashing")
                .params(&["slashing"])
                .data("slashing")
                .build()?,
        )
        .build()
}

pub fn network_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("NetworkAPI")
        .endpoint(api("enr").returns(ResponseType::obj::<String>()).build()?)
        .build()
}

/// Root of the standard API.
pub fn eth2_api() -> Result<Arc<RouteModel>, DeclarationError> {
    RouteModel::builder("Eth2API")
        .route("beacon", beacon_api()?)
        .route("network", network_api()?)
        .build()
}
