//! Edit store upload tests.

use grc20_publisher::publish::{EditStore, IpfsPublisher, PublishError};
use grc20_publisher::schema::{EditBuilder, PropertyDecl, ValueType};

mod common;

const CID: &str = "ipfs://bafkreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy";

#[tokio::test]
async fn test_publish_non_empty_edit() {
    let backend = common::start_mock_backend(200, r#"{"cid":"ipfs://bafkreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy"}"#).await;
    let publisher = IpfsPublisher::new(&backend.ipfs_config()).unwrap();

    let mut builder = EditBuilder::new();
    builder.create_property(PropertyDecl::new("Brand", ValueType::Text)).unwrap();
    let edit = builder.into_edit("Create Properties and Types", None);

    let cid = publisher.publish(&edit).await.unwrap();
    assert_eq!(cid.as_str(), CID);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/ipfs/upload-edit");

    let uploaded: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(uploaded["name"], "Create Properties and Types");
    assert_eq!(uploaded["ops"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_publish_empty_edit() {
    let backend = common::start_mock_backend(200, r#"{"cid":"ipfs://bafkreiempty"}"#).await;
    let publisher = IpfsPublisher::new(&backend.ipfs_config()).unwrap();

    let edit = EditBuilder::new().into_edit("Nothing", None);
    let cid = publisher.publish(&edit).await.unwrap();
    assert_eq!(cid.as_str(), "ipfs://bafkreiempty");
}

#[tokio::test]
async fn test_store_rejects_upload() {
    let backend = common::start_mock_backend(503, "ipfs node offline").await;
    let publisher = IpfsPublisher::new(&backend.ipfs_config()).unwrap();

    let edit = EditBuilder::new().into_edit("Nothing", None);
    let err = publisher.publish(&edit).await.unwrap_err();
    assert!(matches!(err, PublishError::Status { status: 503, ref body } if body == "ipfs node offline"));
}

#[tokio::test]
async fn test_store_answers_without_cid() {
    let backend = common::start_mock_backend(200, r#"{"ok":true}"#).await;
    let publisher = IpfsPublisher::new(&backend.ipfs_config()).unwrap();

    let edit = EditBuilder::new().into_edit("Nothing", None);
    let err = publisher.publish(&edit).await.unwrap_err();
    assert!(matches!(err, PublishError::MissingCid { .. }));
}
