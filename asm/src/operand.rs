use color_print::cformat;
use ippcode::{Arg, ConstKind, Frame, Type};

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Var(Frame, String),
    Const(Const),
    Type(Type),
    Label(String),
}

impl Operand {
    /// Classify a token without knowing which slot it fills.
    /// Tried in order: variable, type keyword, label, constant.
    pub fn classify(raw: &str) -> Option<Operand> {
        Operand::var(raw)
            .or_else(|| Operand::ty(raw))
            .or_else(|| Operand::label(raw))
            .or_else(|| Const::parse(raw).map(Operand::Const))
    }

    /// Parse a token as the operand kind required at its position.
    pub fn parse(arg: Arg, raw: &str) -> Option<Operand> {
        match arg {
            Arg::VAR => Operand::var(raw),
            Arg::SYMB => Operand::var(raw).or_else(|| Const::parse(raw).map(Operand::Const)),
            Arg::LABEL => Operand::label(raw),
            Arg::TYPE => Operand::ty(raw),
        }
    }

    fn var(raw: &str) -> Option<Operand> {
        let (frame, name) = raw.split_once('@')?;
        let frame = frame.parse::<Frame>().ok()?;
        is_ident(name).then(|| Operand::Var(frame, name.to_string()))
    }

    fn ty(raw: &str) -> Option<Operand> {
        raw.parse::<Type>().ok().map(Operand::Type)
    }

    fn label(raw: &str) -> Option<Operand> {
        is_ident(raw).then(|| Operand::Label(raw.to_string()))
    }

    pub fn satisfies(&self, arg: Arg) -> bool {
        matches!(
            (arg, self),
            (Arg::VAR, Operand::Var(_, _))
                | (Arg::SYMB, Operand::Var(_, _))
                | (Arg::SYMB, Operand::Const(_))
                | (Arg::LABEL, Operand::Label(_))
                | (Arg::TYPE, Operand::Type(_))
        )
    }

    /// Value of the `type` attribute in the serialized program.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Var(_, _) => "var",
            Operand::Const(c) => c.kind().into(),
            Operand::Type(_) => "type",
            Operand::Label(_) => "label",
        }
    }

    /// Text content in the serialized program, unescaped.
    pub fn payload(&self) -> String {
        match self {
            Operand::Var(frame, name) => format!("{}@{}", frame, name),
            Operand::Const(c) => c.value(),
            Operand::Type(ty) => ty.to_string(),
            Operand::Label(name) => name.clone(),
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Operand::Var(frame, name) => cformat!("<b>{}@{}</>", frame, name),
            Operand::Const(c) => cformat!("<y>{}@{}</>", c.kind(), c.value()),
            Operand::Type(ty) => cformat!("<c>{}</>", ty),
            Operand::Label(name) => cformat!("<g>{}</>", name),
        }
    }
}

// ----------------------------------------------------------------------------
// Constant

/// Literal constant. Numeric and string values keep their source spelling;
/// `\ddd` escapes are not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Const {
    Int(String),
    Bool(bool),
    String(String),
    Nil,
    Float(String),
}

impl Const {
    pub fn parse(raw: &str) -> Option<Const> {
        let (prefix, value) = raw.split_once('@')?;
        match prefix.parse::<ConstKind>().ok()? {
            ConstKind::Int => is_int(value).then(|| Const::Int(value.to_string())),
            ConstKind::Bool => match value {
                "true" => Some(Const::Bool(true)),
                "false" => Some(Const::Bool(false)),
                _ => None,
            },
            ConstKind::String => is_string(value).then(|| Const::String(value.to_string())),
            ConstKind::Nil => (value == "nil").then_some(Const::Nil),
            ConstKind::Float => is_float(value).then(|| Const::Float(value.to_string())),
        }
    }

    pub fn kind(&self) -> ConstKind {
        match self {
            Const::Int(_) => ConstKind::Int,
            Const::Bool(_) => ConstKind::Bool,
            Const::String(_) => ConstKind::String,
            Const::Nil => ConstKind::Nil,
            Const::Float(_) => ConstKind::Float,
        }
    }

    pub fn value(&self) -> String {
        match self {
            Const::Int(v) | Const::String(v) | Const::Float(v) => v.clone(),
            Const::Bool(b) => b.to_string(),
            Const::Nil => "nil".to_string(),
        }
    }
}

// ----------------------------------------------------------------------------
// Lexical rules

const IDENT_SPECIAL: &str = "_$&%*!?-";

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if head.is_ascii_alphabetic() || IDENT_SPECIAL.contains(head) => chars
            .all(|c| c.is_ascii_alphanumeric() || IDENT_SPECIAL.contains(c)),
        _ => false,
    }
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn is_digits(s: &str, radix: u32) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
}

fn is_int(s: &str) -> bool {
    is_digits(strip_sign(s), 10)
}

/// No whitespace, no `#`, and every `\` starts a three-digit escape.
fn is_string(s: &str) -> bool {
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escape: String = chars.by_ref().take(3).collect();
                if escape.len() != 3 || !is_digits(&escape, 10) {
                    return false;
                }
            }
            '#' => return false,
            c if c.is_whitespace() => return false,
            _ => {}
        }
    }
    true
}

fn is_float(s: &str) -> bool {
    let unsigned = strip_sign(s);
    match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => is_hex_float(hex),
        None => is_dec_float(unsigned),
    }
}

// 1.8p+1, .8p0, 1p-3
fn is_hex_float(s: &str) -> bool {
    let Some((mantissa, exponent)) = s.split_once(['p', 'P']) else {
        return false;
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits_ok = (!int.is_empty() || !frac.is_empty())
        && int.chars().all(|c| c.is_ascii_hexdigit())
        && frac.chars().all(|c| c.is_ascii_hexdigit());
    digits_ok && is_int(exponent)
}

// 1.5, .5, 1., 2e10, 1.5E-3
fn is_dec_float(s: &str) -> bool {
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (s, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits_ok = (!int.is_empty() || !frac.is_empty())
        && int.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit());
    digits_ok && exponent.map_or(true, is_int)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_classify {
        ($($name:ident: $src:expr => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(Operand::classify($src), $expect);
                }
            )*
        }
    }

    fn var(frame: Frame, name: &str) -> Option<Operand> {
        Some(Operand::Var(frame, name.to_string()))
    }

    fn konst(c: Const) -> Option<Operand> {
        Some(Operand::Const(c))
    }

    test_classify! {
        var_gf: "GF@counter" => var(Frame::GF, "counter"),
        var_lf_special: "LF@_$&%*!?-x1" => var(Frame::LF, "_$&%*!?-x1"),
        var_tf_dash: "TF@-" => var(Frame::TF, "-"),
        type_int: "int" => Some(Operand::Type(Type::Int)),
        type_string: "string" => Some(Operand::Type(Type::String)),
        label_plain: "loop" => Some(Operand::Label("loop".to_string())),
        label_special: "&end?" => Some(Operand::Label("&end?".to_string())),
        int_plain: "int@42" => konst(Const::Int("42".to_string())),
        int_signed: "int@-7" => konst(Const::Int("-7".to_string())),
        int_plus: "int@+7" => konst(Const::Int("+7".to_string())),
        bool_true: "bool@true" => konst(Const::Bool(true)),
        bool_false: "bool@false" => konst(Const::Bool(false)),
        nil: "nil@nil" => konst(Const::Nil),
        string_plain: "string@hello" => konst(Const::String("hello".to_string())),
        string_empty: "string@" => konst(Const::String(String::new())),
        string_escape: "string@a\\032b" => konst(Const::String("a\\032b".to_string())),
        string_at: "string@a@b" => konst(Const::String("a@b".to_string())),
        string_unicode: "string@žluťoučký" => konst(Const::String("žluťoučký".to_string())),
        float_dec: "float@1.5" => konst(Const::Float("1.5".to_string())),
        float_exp: "float@-2e10" => konst(Const::Float("-2e10".to_string())),
        float_hex: "float@0x1.8p+1" => konst(Const::Float("0x1.8p+1".to_string())),
        float_hex_neg: "float@-0x1p-3" => konst(Const::Float("-0x1p-3".to_string())),
    }

    test_classify! {
        bad_frame: "XF@x" => None,
        bad_frame_case: "gf@x" => None,
        bad_var_name: "GF@1x" => None,
        empty_var_name: "GF@" => None,
        bad_label_digit: "1abc" => None,
        bad_int: "int@12a" => None,
        empty_int: "int@" => None,
        bad_bool: "bool@TRUE" => None,
        bad_nil: "nil@null" => None,
        bad_prefix: "char@a" => None,
        bad_escape_short: "string@a\\03" => None,
        bad_escape_alpha: "string@\\x41" => None,
        bad_hash: "string@a#b" => None,
        bad_float: "float@abc" => None,
        bad_float_inf: "float@inf" => None,
        bad_float_hex_no_exp: "float@0x1.8" => None,
        empty: "" => None,
    }

    #[test]
    fn slot_decides_ambiguous_keyword() {
        assert_eq!(
            Operand::parse(Arg::LABEL, "int"),
            Some(Operand::Label("int".to_string()))
        );
        assert_eq!(Operand::parse(Arg::TYPE, "int"), Some(Operand::Type(Type::Int)));
        assert_eq!(Operand::parse(Arg::TYPE, "float"), None);
    }

    #[test]
    fn symb_accepts_var_or_const() {
        assert!(Operand::parse(Arg::SYMB, "GF@x").is_some());
        assert!(Operand::parse(Arg::SYMB, "nil@nil").is_some());
        assert!(Operand::parse(Arg::SYMB, "label").is_none());
        assert!(Operand::parse(Arg::VAR, "int@1").is_none());
    }

    #[test]
    fn classified_operand_satisfies_exactly_its_slots() {
        let label = Operand::classify("end").unwrap();
        assert!(label.satisfies(Arg::LABEL));
        assert!(!label.satisfies(Arg::SYMB));

        let var = Operand::classify("GF@x").unwrap();
        assert!(var.satisfies(Arg::VAR));
        assert!(var.satisfies(Arg::SYMB));
        assert!(!var.satisfies(Arg::TYPE));
    }

    #[test]
    fn kind_and_payload() {
        let cases = [
            ("GF@x", "var", "GF@x"),
            ("int", "type", "int"),
            ("end", "label", "end"),
            ("int@-3", "int", "-3"),
            ("bool@true", "bool", "true"),
            ("nil@nil", "nil", "nil"),
            ("string@a<b", "string", "a<b"),
            ("float@0x1p0", "float", "0x1p0"),
        ];
        for (src, kind, payload) in cases {
            let op = Operand::classify(src).unwrap();
            assert_eq!(op.kind(), kind, "{src}");
            assert_eq!(op.payload(), payload, "{src}");
        }
    }
}
