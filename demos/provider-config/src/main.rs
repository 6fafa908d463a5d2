//! End-to-end demo: validate a provider configuration, encrypt it for
//! storage, reject a forbidden update, and restore it for use.

use anyhow::Result;
use confidant_rs::{FieldSchema, FieldType, PrefixCipher, SchemaDefinition, SchemaEngine};
use serde_json::json;

/// Schema a vector-store provider might ship in its manifest.
fn provider_schema() -> SchemaDefinition {
    [
        (
            "provider".to_string(),
            FieldSchema::new("Provider", FieldType::String)
                .required()
                .immutable()
                .allowed_values(["pinecone", "qdrant", "pgvector"]),
        ),
        (
            "api_key".to_string(),
            FieldSchema::new("API Key", FieldType::Secret)
                .required()
                .placeholder("sk-..."),
        ),
        (
            "options".to_string(),
            FieldSchema::new("Options", FieldType::Object).properties(vec![
                (
                    "endpoint",
                    FieldSchema::new("Endpoint", FieldType::String).min_length(8),
                ),
                (
                    "admin_token",
                    FieldSchema::new("Admin Token", FieldType::Secret),
                ),
            ]),
        ),
    ]
    .into_iter()
    .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let engine = SchemaEngine::with_cipher(provider_schema(), PrefixCipher::new("vault:"));

    let submitted = json!({
        "provider": "qdrant",
        "api_key": "sk-live-1234",
        "options": { "endpoint": "https://qdrant.local", "admin_token": "root-1" },
    });

    let stored = engine.process_inbound(submitted).await?;
    println!("stored blob:    {stored}");

    let update = json!({
        "provider": "pinecone",
        "api_key": "sk-live-5678",
    });
    let diff = engine.diff_immutable(&json!({ "provider": "qdrant" }), &update);
    println!("update check:   {:?}", diff.errors);

    let restored = engine.process_outbound(stored).await?;
    println!("restored blob:  {restored}");

    Ok(())
}
