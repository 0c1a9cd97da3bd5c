#![allow(missing_docs)]

/// A service configuration payload, pretty-printed, exercising every value
/// kind, escapes, multi-byte text and empty containers.
pub const DOCUMENT: &str = r#"
{
    "service": {
        "name": "ingest-gateway",
        "region": "eu-west-1",
        "replicas": 3,
        "enabled": true,
        "draining": false,
        "owner": null
    },
    "limits": {
        "max_body_bytes": 1048576,
        "timeout_secs": 2.5,
        "backoff": [0.1, 0.2, 0.4, 0.8, 1.6],
        "burst": -1e3
    },
    "routes": [
        {
            "path": "/v1/events",
            "methods": ["POST", "PUT"],
            "headers": {}
        },
        {
            "path": "/v1/health",
            "methods": ["GET"],
            "headers": {"cache-control": "no-store"}
        }
    ],
    "labels": {
        "team": "Plattform \u00fcber alles",
        "motto": "\"ship it\"\n\tsafely",
        "emoji": "🚀 ⚙ €",
        "path": "C:\\srv\\ingest"
    },
    "matrix": [[1, 2], [], [3, [4, [5]]]],
    "empty": []
}"#;
