use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// A JSON object, such as a discovery document or a set of request parameters,
/// from which [TypedParameters](TypedParameter) are read.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UntypedObject(pub(crate) Map<String, Json>);

/// A single, strongly typed entry of an [UntypedObject].
pub trait TypedParameter:
    TryFrom<Json, Error = anyhow::Error> + Into<Json> + Clone + std::fmt::Debug
{
    const KEY: &'static str;
}

impl UntypedObject {
    /// Read a [TypedParameter], falling back to its default when the key is absent.
    pub fn get_or_default<T: TypedParameter + Default>(&self) -> Result<T> {
        self.get().transpose().map(Option::unwrap_or_default)
    }

    /// Read a [TypedParameter]. `None` if the key is absent.
    pub fn get<T: TypedParameter>(&self) -> Option<Result<T>> {
        Some(self.0.get(T::KEY)?.clone().try_into())
    }

    /// Write a [TypedParameter], replacing any previous value under the same key.
    pub fn insert<T: TypedParameter>(&mut self, t: T) {
        self.0.insert(T::KEY.to_owned(), t.into());
    }

    pub fn contains<T: TypedParameter>(&self) -> bool {
        self.0.contains_key(T::KEY)
    }
}

impl From<UntypedObject> for Json {
    fn from(value: UntypedObject) -> Self {
        value.0.into()
    }
}

impl TryFrom<Json> for UntypedObject {
    type Error = anyhow::Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(map) = value else {
            anyhow::bail!("expected a JSON object")
        };
        Ok(Self(map))
    }
}

pub trait ParsingErrorContext {
    type T: TypedParameter;

    fn parsing_error(self) -> Result<Self::T>;
}

impl<T: TypedParameter> ParsingErrorContext for Option<Result<T>> {
    type T = T;

    fn parsing_error(self) -> Result<T> {
        self.context(format!("'{}' is missing", T::KEY))?
            .context(format!("'{}' could not be parsed", T::KEY))
    }
}

impl<T: TypedParameter> ParsingErrorContext for Result<T> {
    type T = T;

    fn parsing_error(self) -> Result<T> {
        self.context(format!("'{}' could not be parsed", T::KEY))
    }
}
