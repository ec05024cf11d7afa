//! Request path parsing for page operations.
//!
//! Page paths have exactly two segments, `/{operation}/{name}`. Anything else
//! is rejected before a handler or the page store sees it.

use std::fmt;

use crate::errors::WikiError;
use crate::types::PageName;

/// The page operations reachable through `/{operation}/{name}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "view" => Some(Operation::View),
            "edit" => Some(Operation::Edit),
            "save" => Some(Operation::Save),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }
}

/// A parsed and validated page route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation: Operation,
    pub name: PageName,
}

impl Route {
    pub fn new(operation: Operation, name: PageName) -> Self {
        Self { operation, name }
    }

    /// Parse a request path such as `/view/Home`.
    ///
    /// Unknown keywords, missing or invalid names, and extra or trailing
    /// segments all yield [`WikiError::InvalidName`].
    pub fn parse(path: &str) -> Result<Self, WikiError> {
        let rest = path.strip_prefix('/').ok_or(WikiError::InvalidName)?;
        let mut segments = rest.split('/');

        let operation = segments
            .next()
            .and_then(Operation::from_keyword)
            .ok_or(WikiError::InvalidName)?;
        let name = PageName::parse(segments.next().ok_or(WikiError::InvalidName)?)?;

        if segments.next().is_some() {
            return Err(WikiError::InvalidName);
        }
        Ok(Self { operation, name })
    }

    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.operation.keyword(), self.name)
    }
}
