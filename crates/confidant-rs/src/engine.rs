//! Schema engine façade and the encrypt/decrypt tree-walkers.

use crate::error::EngineError;
use confidant_rs_crypto::{IdentityCipher, SecretCipher};
use confidant_rs_schema::{
    FieldSchema, FieldType, SchemaDefinition, ValidationReport, diff_immutable, validate,
};
use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use log::debug;
use serde_json::{Map, Value};

/// Direction of a secret-field pass over the value tree.
#[derive(Debug, Clone, Copy)]
enum SecretPass {
    /// Inbound: plaintext secrets become ciphertext before persisting.
    Encrypt,
    /// Outbound: stored ciphertext is restored to its logical form.
    Decrypt,
}

/// Stateless configuration processor bound to one schema and one cipher.
///
/// The engine holds no mutable state; concurrent calls on a shared instance
/// are safe as long as the cipher is safe to call concurrently.
pub struct SchemaEngine<C = IdentityCipher> {
    /// Root schema, immutable for the lifetime of the engine.
    schema: SchemaDefinition,
    /// Injected encrypt/decrypt provider.
    cipher: C,
}

impl SchemaEngine<IdentityCipher> {
    /// Build an engine that stores secrets verbatim.
    pub fn new(schema: SchemaDefinition) -> Self {
        Self::with_cipher(schema, IdentityCipher)
    }
}

impl<C: SecretCipher> SchemaEngine<C> {
    /// Build an engine around the given cipher.
    pub fn with_cipher(schema: SchemaDefinition, cipher: C) -> Self {
        Self { schema, cipher }
    }

    /// The bound schema, e.g. for dynamic form renderers.
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Validate a value tree against the bound schema.
    ///
    /// Never fails; callers branch on [`ValidationReport::is_valid`].
    pub fn validate(&self, values: &Value) -> ValidationReport {
        validate(&self.schema, values)
    }

    /// Compare stored (decrypted) values against a proposed update and
    /// report forbidden changes to immutable fields.
    pub fn diff_immutable(&self, old_values: &Value, new_values: &Value) -> ValidationReport {
        diff_immutable(&self.schema, old_values, new_values)
    }

    /// Validate, then encrypt every secret field for persistence.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] when the tree fails validation,
    /// [`EngineError::Cipher`] when any single encryption fails; no
    /// partially encrypted tree is ever returned.
    pub async fn process_inbound(&self, values: Value) -> Result<Value, EngineError> {
        let report = self.validate(&values);
        if !report.is_valid() {
            debug!("inbound configuration rejected: {report}");
            return Err(EngineError::Validation(report));
        }
        match values {
            Value::Object(map) => {
                let encrypted = self
                    .transform_map(&self.schema, map, SecretPass::Encrypt)
                    .await?;
                Ok(Value::Object(encrypted))
            }
            // Unreachable post-validation; passed through unchanged.
            other => Ok(other),
        }
    }

    /// Decrypt every secret field, then validate the restored tree.
    ///
    /// Decryption runs first because stored values are ciphertext and must
    /// be back in logical form before checks such as enum membership.
    ///
    /// # Errors
    ///
    /// [`EngineError::Cipher`] when any single decryption fails,
    /// [`EngineError::Validation`] when the decrypted tree is invalid.
    pub async fn process_outbound(&self, values: Value) -> Result<Value, EngineError> {
        let decrypted = match values {
            Value::Object(map) => {
                let map = self
                    .transform_map(&self.schema, map, SecretPass::Decrypt)
                    .await?;
                Value::Object(map)
            }
            other => other,
        };
        let report = self.validate(&decrypted);
        if !report.is_valid() {
            debug!("outbound configuration rejected: {report}");
            return Err(EngineError::Validation(report));
        }
        Ok(decrypted)
    }

    /// Apply a secret pass to one object level.
    ///
    /// Sibling fields are dispatched concurrently and joined positionally,
    /// so output order always matches input order. Keys the schema does not
    /// cover are passed through unchanged.
    fn transform_map<'a>(
        &'a self,
        schema: &'a SchemaDefinition,
        values: Map<String, Value>,
        pass: SecretPass,
    ) -> BoxFuture<'a, Result<Map<String, Value>, EngineError>> {
        async move {
            let mut keys = Vec::with_capacity(values.len());
            let mut pending = Vec::with_capacity(values.len());
            for (key, value) in values {
                let transformed = match schema.get(&key) {
                    Some(field) => self.transform_value(field, value, pass),
                    None => future::ready(Ok(value)).boxed(),
                };
                keys.push(key);
                pending.push(transformed);
            }
            let transformed = future::try_join_all(pending).await?;
            Ok(keys.into_iter().zip(transformed).collect())
        }
        .boxed()
    }

    /// Apply a secret pass to one value under its field schema.
    ///
    /// Nulls pass through at every step; a null secret is not an error.
    fn transform_value<'a>(
        &'a self,
        field: &'a FieldSchema,
        value: Value,
        pass: SecretPass,
    ) -> BoxFuture<'a, Result<Value, EngineError>> {
        async move {
            if value.is_null() {
                return Ok(value);
            }
            match field.field_type {
                FieldType::Secret => self.transform_secret(value, pass).await,
                FieldType::Object => match (&field.properties, value) {
                    (Some(properties), Value::Object(map)) => {
                        let map = self.transform_map(properties, map, pass).await?;
                        Ok(Value::Object(map))
                    }
                    (_, value) => Ok(value),
                },
                FieldType::Array => match (&field.items, value) {
                    (Some(items), Value::Array(elements)) => {
                        let pending: Vec<_> = elements
                            .into_iter()
                            .map(|element| self.transform_value(items, element, pass))
                            .collect();
                        let elements = future::try_join_all(pending).await?;
                        Ok(Value::Array(elements))
                    }
                    (_, value) => Ok(value),
                },
                FieldType::String | FieldType::Number | FieldType::Boolean => Ok(value),
            }
        }
        .boxed()
    }

    /// Run one secret leaf through the cipher.
    ///
    /// Non-string secrets are left untouched; validation reports those on
    /// the inbound path.
    async fn transform_secret(&self, value: Value, pass: SecretPass) -> Result<Value, EngineError> {
        match value {
            Value::String(text) => {
                let transformed = match pass {
                    SecretPass::Encrypt => self.cipher.encrypt(&text).await?,
                    SecretPass::Decrypt => self.cipher.decrypt(&text).await?,
                };
                Ok(Value::String(transformed))
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidant_rs_crypto::PrefixCipher;
    use confidant_rs_schema::FieldSchema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema_of(fields: Vec<(&str, FieldSchema)>) -> SchemaDefinition {
        fields
            .into_iter()
            .map(|(name, field)| (name.to_string(), field))
            .collect()
    }

    /// Secrets are encrypted in place; other fields are untouched.
    #[tokio::test]
    async fn inbound_encrypts_secret_leaves() {
        let schema = schema_of(vec![
            ("api_key", FieldSchema::new("API Key", FieldType::Secret)),
            ("host", FieldSchema::new("Host", FieldType::String)),
        ]);
        let engine = SchemaEngine::with_cipher(schema, PrefixCipher::new("enc-"));
        let stored = engine
            .process_inbound(json!({ "api_key": "k", "host": "db" }))
            .await
            .expect("inbound");
        assert_eq!(stored, json!({ "api_key": "enc-k", "host": "db" }));
    }

    /// Invalid trees are rejected before any encryption happens.
    #[tokio::test]
    async fn inbound_validates_first() {
        let schema = schema_of(vec![(
            "api_key",
            FieldSchema::new("API Key", FieldType::Secret).required(),
        )]);
        let engine = SchemaEngine::with_cipher(schema, PrefixCipher::new("enc-"));
        let err = engine.process_inbound(json!({})).await.unwrap_err();
        assert_eq!(
            err.validation_errors(),
            Some(&["api_key is required".to_string()][..])
        );
        assert_eq!(err.to_string(), "api_key is required");
    }

    /// Outbound decrypts before validating, so enum checks see plaintext.
    #[tokio::test]
    async fn outbound_decrypts_before_validation() {
        let schema = schema_of(vec![(
            "mode",
            FieldSchema::new("Mode", FieldType::Secret).allowed_values(["fast", "safe"]),
        )]);
        let engine = SchemaEngine::with_cipher(schema, PrefixCipher::new("enc-"));
        let restored = engine
            .process_outbound(json!({ "mode": "enc-fast" }))
            .await
            .expect("outbound");
        assert_eq!(restored, json!({ "mode": "fast" }));
    }

    /// Null secrets pass through both walkers untouched.
    #[tokio::test]
    async fn null_secrets_pass_through() {
        let schema = schema_of(vec![(
            "api_key",
            FieldSchema::new("API Key", FieldType::Secret),
        )]);
        let engine = SchemaEngine::with_cipher(schema, PrefixCipher::new("enc-"));
        let stored = engine
            .process_inbound(json!({ "api_key": null }))
            .await
            .expect("inbound");
        assert_eq!(stored, json!({ "api_key": null }));
        let restored = engine.process_outbound(stored).await.expect("outbound");
        assert_eq!(restored, json!({ "api_key": null }));
    }

    /// Secrets nested in objects and arrays are reached in schema order.
    #[tokio::test]
    async fn nested_secrets_encrypted() {
        let schema = schema_of(vec![(
            "providers",
            FieldSchema::new("Providers", FieldType::Array).items(
                FieldSchema::new("Provider", FieldType::Object).properties(vec![
                    ("name", FieldSchema::new("Name", FieldType::String)),
                    ("token", FieldSchema::new("Token", FieldType::Secret)),
                ]),
            ),
        )]);
        let engine = SchemaEngine::with_cipher(schema, PrefixCipher::new("enc-"));
        let stored = engine
            .process_inbound(json!({
                "providers": [
                    { "name": "a", "token": "ta" },
                    { "name": "b", "token": "tb" },
                ]
            }))
            .await
            .expect("inbound");
        assert_eq!(
            stored,
            json!({
                "providers": [
                    { "name": "a", "token": "enc-ta" },
                    { "name": "b", "token": "enc-tb" },
                ]
            })
        );
    }

    /// Secret-typed array items are encrypted per element.
    #[tokio::test]
    async fn secret_array_items_encrypted() {
        let schema = schema_of(vec![(
            "keys",
            FieldSchema::new("Keys", FieldType::Array)
                .items(FieldSchema::new("Key", FieldType::Secret)),
        )]);
        let engine = SchemaEngine::with_cipher(schema, PrefixCipher::new("enc-"));
        let stored = engine
            .process_inbound(json!({ "keys": ["a", "b"] }))
            .await
            .expect("inbound");
        assert_eq!(stored, json!({ "keys": ["enc-a", "enc-b"] }));
    }

    /// The identity default leaves the tree unchanged.
    #[tokio::test]
    async fn identity_engine_is_a_no_op() {
        let schema = schema_of(vec![(
            "api_key",
            FieldSchema::new("API Key", FieldType::Secret),
        )]);
        let engine = SchemaEngine::new(schema);
        let values = json!({ "api_key": "k" });
        let stored = engine.process_inbound(values.clone()).await.expect("inbound");
        assert_eq!(stored, values);
    }
}
