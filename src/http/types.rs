use std::fmt::Display;

use reqwest::{
    Method,
    header::{HeaderMap, HeaderName, HeaderValue},
    multipart::Form,
};
use serde::{Deserialize, Serialize, ser::Error as _};
use serde_json::Value;

use super::error::HttpError;
use crate::codec::CodecError;

/// The `{code, msg, data}` wrapper every backend response uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    /// 0 on success, nonzero for an application error.
    #[serde(default)]
    pub code: i64,
    #[serde(default, alias = "message")]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// The payload, or [`HttpError::Application`] when `code` is nonzero.
    pub fn into_data(self) -> Result<Option<T>, HttpError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(HttpError::Application {
                code: self.code,
                message: self.msg,
            })
        }
    }
}

/// Body of an outgoing request.
#[derive(Debug)]
pub enum RequestBody {
    /// Serialized through the precision-safe codec.
    Json(Value),
    /// Sent as-is; never touched by the codec.
    Multipart(Form),
}

/// Logical description of one API call.
#[derive(Debug)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/user/login`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Adds every non-null field of `params` as a query parameter.
    pub fn query_params<T: Serialize>(mut self, params: &T) -> Result<Self, CodecError> {
        let Value::Object(map) = serde_json::to_value(params)? else {
            return Err(serde_json::Error::custom("query parameters must serialize to an object").into());
        };
        for (key, value) in map {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.query.push((key, value));
        }
        Ok(self)
    }

    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, CodecError> {
        Ok(self.json_value(serde_json::to_value(body)?))
    }

    pub fn json_value(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
