use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Variable scope prefix, written before `@` (`GF@counter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr)]
pub enum Frame {
    GF,
    LF,
    TF,
}

/// Value type keyword accepted by `READ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Type {
    Int,
    Bool,
    String,
}

/// Prefix of a constant literal (`int@42`, `nil@nil`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ConstKind {
    Int,
    Bool,
    String,
    Nil,
    Float,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_case_sensitive() {
        assert_eq!("GF".parse::<Frame>(), Ok(Frame::GF));
        assert_eq!("TF".parse::<Frame>(), Ok(Frame::TF));
        assert!("gf".parse::<Frame>().is_err());
        assert!("XF".parse::<Frame>().is_err());
    }

    #[test]
    fn type_keywords() {
        assert_eq!("int".parse::<Type>(), Ok(Type::Int));
        assert_eq!("string".parse::<Type>(), Ok(Type::String));
        assert!("float".parse::<Type>().is_err());
        assert!("Int".parse::<Type>().is_err());
        assert_eq!(Type::Bool.to_string(), "bool");
    }

    #[test]
    fn const_prefixes() {
        assert_eq!("nil".parse::<ConstKind>(), Ok(ConstKind::Nil));
        assert_eq!("float".parse::<ConstKind>(), Ok(ConstKind::Float));
        assert!("var".parse::<ConstKind>().is_err());
        assert_eq!(ConstKind::String.to_string(), "string");
    }
}
