//! Resource payload assembled before it is sent

use crate::types::{Files, JsonObject, JsonValue, Params};
use std::path::PathBuf;

/// Body, URI parameters and upload files for one create or update call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiObject {
    id: Option<JsonValue>,
    data: JsonObject,
    uri_parameters: Params,
    files: Files,
}

impl ApiObject {
    pub fn new(data: JsonObject, uri_parameters: Params, files: Files) -> Self {
        Self {
            id: None,
            data,
            uri_parameters,
            files,
        }
    }

    /// Identifier of an existing resource; `None` until the object is saved
    pub fn id(&self) -> Option<&JsonValue> {
        self.id.as_ref()
    }

    /// Mark the object as an existing resource, so saving updates it
    pub fn set_id(&mut self, id: impl Into<JsonValue>) {
        self.id = Some(id.into());
    }

    pub fn data(&self) -> &JsonObject {
        &self.data
    }

    /// Body as a JSON value, ready to send
    pub fn body(&self) -> JsonValue {
        JsonValue::Object(self.data.clone())
    }

    /// Values for the placeholders of the resource URI
    pub fn uri_parameters(&self) -> &Params {
        &self.uri_parameters
    }

    /// Upload files by form field; any entry makes the request multipart
    pub fn files(&self) -> &Files {
        &self.files
    }

    /// Set one body field, replacing any previous value
    pub fn set_data_value(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.data.insert(key.into(), value.into());
    }

    /// Attach a file to upload under the multipart field `key`
    pub fn add_file(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
        self.files.insert(key.into(), path.into());
    }
}
