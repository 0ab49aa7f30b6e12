use std::time::Duration;

use eth2_api::core::{ContentType, Method};
use eth2_api::error::ApiError;
use eth2_api::http::{Eth2HttpClient, Eth2HttpOptions};
use eth2_api::models::primitives::{
    ApiState, Epoch, Fork, Opaque, ProposerSlashing, Root, Slot, ValidatorIndex, Version,
};
use eth2_api::models::{CONSENSUS_FORMATS, lighthouse};
use eth2_api::models::standard::{ValidatorInfo, ValidatorInfoList, ValidatorStatus};
use eth2_api::obj::{FromObj, ObjList, ToObj};
use eth2_api::route::{Arg, Args, ResponseType, RouteModel, api};
use eth2_api::ssz::SszEncode;
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATE_ROOT: &str = "0xabababababababababababababababababababababababababababababababab";

fn options(server: &MockServer) -> Eth2HttpOptions {
    Eth2HttpOptions {
        api_base_url: server.uri(),
        default_timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

fn open(options: Eth2HttpOptions) -> Eth2HttpClient {
    Eth2HttpClient::open(options).unwrap()
}

fn sample_fork() -> Fork {
    Fork {
        previous_version: Version([0, 0, 0, 1]),
        current_version: Version([0, 0, 0, 2]),
        epoch: Epoch(3),
    }
}

#[tokio::test]
async fn state_by_slot_sends_query_and_accept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/beacon/state"))
        .and(query_param("slot", "1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "root": STATE_ROOT,
            "beacon_state": {"slot": 1},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = open(options(&server));
    let state: ApiState = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .endpoint("state")
        .unwrap()
        .call(Args::new().kw("slot", Slot(1)))
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(state.root, STATE_ROOT.parse::<Root>().unwrap());
    assert_eq!(state.beacon_state.as_obj(), Some(&json!({"slot": 1})));

    // The root keyword was never given, so it is not sent.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("slot=1"));
}

#[tokio::test]
async fn ssz_state_keeps_the_raw_payload() {
    let server = MockServer::start().await;
    let root: Root = STATE_ROOT.parse().unwrap();
    let mut body = root.encode_bytes();
    body.extend_from_slice(&36u32.to_le_bytes());
    body.extend_from_slice(&[1, 2, 3]);
    Mock::given(method("GET"))
        .and(path("/beacon/state"))
        .and(header("accept", "application/ssz"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/ssz"))
        .mount(&server)
        .await;

    let client = open(Eth2HttpOptions {
        default_resp_type: ContentType::Ssz,
        ..options(&server)
    });
    let state: ApiState = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .endpoint("state")
        .unwrap()
        .call(Args::new().arg(root).arg(Slot(7)))
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(state.root, root);
    assert_eq!(state.beacon_state, Opaque::Ssz(vec![1, 2, 3]));
}

#[tokio::test]
async fn unsupported_default_is_not_requested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/network/enr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("enr:-abc")))
        .mount(&server)
        .await;

    let client = open(Eth2HttpOptions {
        default_resp_type: ContentType::Ssz,
        ..options(&server)
    });
    let enr: String = client
        .api()
        .unwrap()
        .route("network")
        .unwrap()
        .endpoint("enr")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(enr, "enr:-abc");

    // The transport may fill in its own wildcard, but never the unsupported default.
    let requests = server.received_requests().await.unwrap();
    let accept = requests[0].headers.get("accept").map(|v| v.to_str().unwrap().to_string());
    assert_ne!(accept.as_deref(), Some("application/ssz"));
}

#[tokio::test]
async fn fork_through_variable_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/beacon/states/slot/1/fork"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "previous_version": "0x00000001",
            "current_version": "0x00000002",
            "epoch": "3",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = open(options(&server));
    let fork: Fork = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .route("states")
        .unwrap()
        .route("slot")
        .unwrap()
        .at(Slot(1))
        .unwrap()
        .endpoint("fork")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(fork, sample_fork());
}

fn validator_json(balance: u64) -> serde_json::Value {
    json!({
        "validator": {
            "pubkey": format!("0x{}", "aa".repeat(48)),
            "withdrawal_credentials": format!("0x{}", "00".repeat(32)),
            "effective_balance": "32000000000",
            "slashed": false,
            "activation_eligibility_epoch": "0",
            "activation_epoch": "0",
            "exit_epoch": "18446744073709551615",
            "withdrawable_epoch": "18446744073709551615",
        },
        "status": "active",
        "balance": balance.to_string(),
    })
}

#[tokio::test]
async fn validators_route_is_callable_and_indexable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/beacon/states/finalized/validators"))
        .and(query_param("validatorIds", "1"))
        .and(query_param("validatorIds", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([validator_json(1), validator_json(2)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/beacon/states/finalized/validators/index/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(validator_json(2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = open(options(&server));
    let validators = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .route("states")
        .unwrap()
        .route("finalized")
        .unwrap()
        .route("validators")
        .unwrap();

    let ids = ObjList(vec![ValidatorIndex(1), ValidatorIndex(2)]);
    let all: ValidatorInfoList = validators
        .call(Args::new().arg(Arg::obj(ids)))
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].balance.0, 2);

    let one: ValidatorInfo = validators
        .route("index")
        .unwrap()
        .at(ValidatorIndex(2))
        .unwrap()
        .call(Args::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(one.status, ValidatorStatus::Active);
}

#[tokio::test]
async fn missing_content_type_falls_back_to_the_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/beacon/states/head/fork"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(sample_fork().encode_bytes()))
        .mount(&server)
        .await;

    let client = open(Eth2HttpOptions {
        default_resp_type: ContentType::Ssz,
        ..options(&server)
    });
    let fork: Fork = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .route("states")
        .unwrap()
        .route("head")
        .unwrap()
        .endpoint("fork")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(fork, sample_fork());
}

#[tokio::test]
async fn proposer_slashing_requires_a_body() {
    let server = MockServer::start().await;
    let client = open(options(&server));
    let err = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .endpoint("post_proposer_slashing")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MissingBody(ref key) if key == "slashing"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn proposer_slashing_body_follows_request_type() {
    let server = MockServer::start().await;
    let slashing = ProposerSlashing::default();
    Mock::given(method("POST"))
        .and(path("/beacon/proposer_slashing"))
        .and(header("content-type", "application/json"))
        .and(body_json(slashing.to_obj()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/beacon/proposer_slashing"))
        .and(header("content-type", "application/ssz"))
        .and(body_bytes(slashing.encode_bytes()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let json_client = open(options(&server));
    let response = json_client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .endpoint("post_proposer_slashing")
        .unwrap()
        .call(Args::new().arg(slashing.clone()))
        .await
        .unwrap();
    assert!(response.is_empty());

    let ssz_client = open(Eth2HttpOptions {
        default_req_type: ContentType::Ssz,
        ..options(&server)
    });
    let response = ssz_client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .endpoint("post_proposer_slashing")
        .unwrap()
        .call(Args::new().kw("slashing", slashing))
        .await
        .unwrap();
    assert!(response.is_empty());
}

#[tokio::test]
async fn json_sourced_state_is_not_sent_as_ssz() {
    let server = MockServer::start().await;
    let state = ApiState::from_obj(json!({
        "root": STATE_ROOT,
        "beacon_state": {"slot": 1},
    }))
    .unwrap();

    let model = RouteModel::builder("Upload")
        .endpoint(
            api("post_state")
                .method(Method::Post)
                .supports(CONSENSUS_FORMATS)
                .name("state")
                .params(&["state"])
                .data("state")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let client = open(Eth2HttpOptions {
        default_req_type: ContentType::Ssz,
        ..options(&server)
    });
    let err = client
        .extended_api(model)
        .endpoint("post_state")
        .unwrap()
        .call(Args::new().arg(state))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotSszType(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_carry_the_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("bad slot"))
        .mount(&server)
        .await;

    let client = open(options(&server));
    let err = client
        .api()
        .unwrap()
        .route("beacon")
        .unwrap()
        .endpoint("state")
        .unwrap()
        .call(Args::new().kw("slot", Slot(u64::MAX)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert!(err.to_string().contains("bad slot"));
}

#[tokio::test]
async fn pinned_response_type_rejects_other_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fork"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sample_fork().encode_bytes(), "application/ssz"))
        .mount(&server)
        .await;

    let model = RouteModel::builder("Pinned")
        .endpoint(
            api("fork")
                .supports(CONSENSUS_FORMATS)
                .resp_type(ContentType::Json)
                .returns(ResponseType::ssz::<Fork>())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let client = open(Eth2HttpOptions {
        default_resp_type: ContentType::Ssz,
        ..options(&server)
    });
    let err = client
        .extended_api(model)
        .endpoint("fork")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("unsupported content type"));
}

#[tokio::test]
async fn response_type_outside_supports_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/network/enr"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 4], "application/octet-stream"))
        .mount(&server)
        .await;

    let client = open(options(&server));
    let err = client
        .api()
        .unwrap()
        .route("network")
        .unwrap()
        .endpoint("enr")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotSupported(ContentType::Ssz)));
}

#[tokio::test]
async fn base_url_path_is_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/network/enr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("enr:-abc")))
        .expect(1)
        .mount(&server)
        .await;

    let client = open(Eth2HttpOptions {
        api_base_url: format!("{}/eth/v1/", server.uri()),
        ..options(&server)
    });
    assert!(client.get_last_request_latency().await.is_none());
    client
        .api()
        .unwrap()
        .route("network")
        .unwrap()
        .endpoint("enr")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap();
    assert!(client.get_last_request_latency().await.is_some());
}

#[tokio::test]
async fn lighthouse_model_on_the_same_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/network/peer_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(4)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/beacon/genesis_time"))
        .and(header("accept", "application/ssz"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(1_606_824_023u64.encode_bytes(), "application/ssz"))
        .mount(&server)
        .await;

    let client = open(options(&server));
    let provider = client.provider();
    let lighthouse_api = client.extended_api(lighthouse::eth2_api().unwrap());

    let peers: u64 = lighthouse_api
        .route("network")
        .unwrap()
        .endpoint("peer_count")
        .unwrap()
        .call(Args::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(peers, 4);

    let ssz_api = provider.extended_api(lighthouse::eth2_api().unwrap());
    let mut genesis_time = ssz_api.route("beacon").unwrap().endpoint("genesis_time").unwrap();
    genesis_time.resp_type = Some(ContentType::Ssz);
    let time: u64 = genesis_time.call(Args::new()).await.unwrap().into_value().unwrap();
    assert_eq!(time, 1_606_824_023);
}
