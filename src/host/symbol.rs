use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub struct SymbolData {
    description: String,
}

impl SymbolData {
    pub fn new(description: impl Into<String>) -> Self {
        SymbolData {
            description: description.into(),
        }
    }

    pub fn new_anonymous() -> Self {
        SymbolData {
            description: Uuid::new_v4().to_hyphenated().to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
impl Clone for SymbolData {
    fn clone(&self) -> Self {
        SymbolData {
            description: self.description.to_string(),
        }
    }
}
impl PartialEq for SymbolData {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}
impl fmt::Debug for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolData({})", self.description)
    }
}
impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/* Well known symbols */
lazy_static! {
    pub static ref SYMBOL_ITERATOR: SymbolData = SymbolData::new("Symbol.iterator");
}
