//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Tempa.
//! The Tempa project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Opcode Registry
//!
//! Directive attributes are plain markup attributes made of a fixed prefix
//! (`data-` by default) and a keyword, e.g. `data-list` or `data-text`. This
//! module decodes such attribute names into a closed set of opcodes and maps
//! every opcode to the category the injector uses to order execution.
//!
//! | Category    | Opcodes                                             |
//! |-------------|-----------------------------------------------------|
//! | Jump        | GOTO                                                |
//! | Conditional | IF, IFNOT, CASE, EXCLUDE                            |
//! | Attribute   | ATTR, ID, SRC, HREF, TITLE, VALUE                   |
//! | Content     | TEXT, HTML, NUMBERING, OBJECT, LIST, OLIST, MAP, OMAP |

use std::fmt;

use crate::dom::{TpNodeId, TpTree};

/// Directive prefix used when no configuration overrides it.
pub const DEFAULT_DIRECTIVE_PREFIX: &str = "data-";

/// Decoded meaning of a directive attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TpOpcode {
    None,
    Attr,
    Id,
    Src,
    Href,
    Title,
    Value,
    Exclude,
    Goto,
    If,
    IfNot,
    Case,
    Text,
    Html,
    Numbering,
    Object,
    List,
    OList,
    Map,
    OMap,
}

/// Execution category of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TpOpcodeType {
    None,
    Jump,
    Conditional,
    Content,
    Attribute,
}

impl TpOpcode {
    /// Every opcode, `None` included.
    pub const ALL: [TpOpcode; 20] = [
        TpOpcode::None,
        TpOpcode::Attr,
        TpOpcode::Id,
        TpOpcode::Src,
        TpOpcode::Href,
        TpOpcode::Title,
        TpOpcode::Value,
        TpOpcode::Exclude,
        TpOpcode::Goto,
        TpOpcode::If,
        TpOpcode::IfNot,
        TpOpcode::Case,
        TpOpcode::Text,
        TpOpcode::Html,
        TpOpcode::Numbering,
        TpOpcode::Object,
        TpOpcode::List,
        TpOpcode::OList,
        TpOpcode::Map,
        TpOpcode::OMap,
    ];

    /// Classifies an attribute name using the default `data-` prefix.
    pub fn from_attr_name(attr_name: &str) -> TpOpcode {
        Self::from_attr_name_with_prefix(attr_name, DEFAULT_DIRECTIVE_PREFIX)
    }

    /// Classifies an attribute name. The prefix must match exactly, the
    /// keyword is matched case-insensitively. Anything else is `None`.
    pub fn from_attr_name_with_prefix(attr_name: &str, prefix: &str) -> TpOpcode {
        match attr_name.strip_prefix(prefix) {
            Some(keyword) => Self::from_keyword(keyword),
            None => TpOpcode::None,
        }
    }

    fn from_keyword(keyword: &str) -> TpOpcode {
        match keyword.to_ascii_uppercase().as_str() {
            "ATTR" => TpOpcode::Attr,
            "ID" => TpOpcode::Id,
            "SRC" => TpOpcode::Src,
            "HREF" => TpOpcode::Href,
            "TITLE" => TpOpcode::Title,
            "VALUE" => TpOpcode::Value,
            "EXCLUDE" => TpOpcode::Exclude,
            "GOTO" => TpOpcode::Goto,
            "IF" => TpOpcode::If,
            "IFNOT" => TpOpcode::IfNot,
            "CASE" => TpOpcode::Case,
            "TEXT" => TpOpcode::Text,
            "HTML" => TpOpcode::Html,
            "NUMBERING" => TpOpcode::Numbering,
            "OBJECT" => TpOpcode::Object,
            "LIST" => TpOpcode::List,
            "OLIST" => TpOpcode::OList,
            "MAP" => TpOpcode::Map,
            "OMAP" => TpOpcode::OMap,
            _ => TpOpcode::None,
        }
    }

    /// Category used by the injector to order execution.
    pub fn category(self) -> TpOpcodeType {
        match self {
            TpOpcode::None => TpOpcodeType::None,
            TpOpcode::Attr
            | TpOpcode::Id
            | TpOpcode::Src
            | TpOpcode::Href
            | TpOpcode::Title
            | TpOpcode::Value => TpOpcodeType::Attribute,
            TpOpcode::If | TpOpcode::IfNot | TpOpcode::Case | TpOpcode::Exclude => {
                TpOpcodeType::Conditional
            }
            TpOpcode::Text
            | TpOpcode::Html
            | TpOpcode::Numbering
            | TpOpcode::Object
            | TpOpcode::List
            | TpOpcode::OList
            | TpOpcode::Map
            | TpOpcode::OMap => TpOpcodeType::Content,
            TpOpcode::Goto => TpOpcodeType::Jump,
        }
    }

    /// Lowercase keyword, as written after the directive prefix.
    pub fn keyword(self) -> &'static str {
        match self {
            TpOpcode::None => "none",
            TpOpcode::Attr => "attr",
            TpOpcode::Id => "id",
            TpOpcode::Src => "src",
            TpOpcode::Href => "href",
            TpOpcode::Title => "title",
            TpOpcode::Value => "value",
            TpOpcode::Exclude => "exclude",
            TpOpcode::Goto => "goto",
            TpOpcode::If => "if",
            TpOpcode::IfNot => "ifnot",
            TpOpcode::Case => "case",
            TpOpcode::Text => "text",
            TpOpcode::Html => "html",
            TpOpcode::Numbering => "numbering",
            TpOpcode::Object => "object",
            TpOpcode::List => "list",
            TpOpcode::OList => "olist",
            TpOpcode::Map => "map",
            TpOpcode::OMap => "omap",
        }
    }

    /// Full directive attribute name for this opcode.
    pub fn attr_name(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.keyword())
    }
}

impl fmt::Display for TpOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keyword().to_ascii_uppercase())
    }
}

impl fmt::Display for TpOpcodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TpOpcodeType::None => "NONE",
            TpOpcodeType::Jump => "JUMP",
            TpOpcodeType::Conditional => "CONDITIONAL",
            TpOpcodeType::Content => "CONTENT",
            TpOpcodeType::Attribute => "ATTRIBUTE",
        };
        f.write_str(name)
    }
}

/// Whether `element` carries the directive for `opcode`.
pub fn has_operator<T: TpTree + ?Sized>(
    tree: &T,
    element: TpNodeId,
    opcode: TpOpcode,
    prefix: &str,
) -> bool {
    tree.has_attr(element, &opcode.attr_name(prefix))
}
