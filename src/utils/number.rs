use crate::math::Complex;
use crate::utils::error::{FractalError, Result};
use regex::Regex;
use std::sync::LazyLock;

// 使用小數逗號的語言
const COMMA_LANGUAGES: &[&str] = &[
    "de", "fr", "es", "it", "nl", "pt", "ru", "pl", "sv", "da", "fi", "nb", "cs", "tr",
];

const NUMBER: &str = r"(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?";

static PURE_IMAGINARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*([+-]?)\s*({NUMBER})?\s*i\s*$")).expect("valid regex")
});

// 實部與虛部之間缺少符號時視為 '+' (URL 中的 '+' 會被解碼成空白)
static FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*([+-]?{NUMBER})\s*(?:([+-]?)\s*({NUMBER})?\s*i)?\s*$"
    ))
    .expect("valid regex")
});

/// 解析數字時採用的小數分隔符號
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLocale {
    DecimalPoint,
    DecimalComma,
}

impl NumberLocale {
    /// 接受 `de_DE`、`de-DE`、`en` 這類語系標籤
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if COMMA_LANGUAGES.contains(&language.as_str()) {
            NumberLocale::DecimalComma
        } else {
            NumberLocale::DecimalPoint
        }
    }

    fn normalize(self, text: &str) -> String {
        match self {
            NumberLocale::DecimalPoint => text.to_string(),
            NumberLocale::DecimalComma => text.replace(',', "."),
        }
    }
}

fn parse_number(input: &str, text: &str) -> Result<f64> {
    text.parse::<f64>().map_err(|e| FractalError::ParseError {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

fn signed(sign: &str, value: f64) -> f64 {
    if sign == "-" {
        -value
    } else {
        value
    }
}

/// 嚴格解析 `a`、`a + bi`、`a - bi`、`bi`、`i`、`-i`
pub fn try_parse_complex(input: &str, locale: NumberLocale) -> Result<Complex> {
    if locale == NumberLocale::DecimalComma && input.contains('.') {
        return Err(FractalError::ParseError {
            input: input.to_string(),
            reason: "expected ',' as decimal separator".to_string(),
        });
    }
    let text = locale.normalize(input);

    if let Some(caps) = PURE_IMAGINARY.captures(&text) {
        let magnitude = match caps.get(2) {
            Some(m) => parse_number(input, m.as_str())?,
            None => 1.0,
        };
        return Ok(Complex::new(0.0, signed(&caps[1], magnitude)));
    }

    let caps = FULL.captures(&text).ok_or_else(|| FractalError::ParseError {
        input: input.to_string(),
        reason: "not a complex number".to_string(),
    })?;

    let re = parse_number(input, &caps[1])?;
    // 第 2 組只有在虛部存在時才會參與匹配 (符號可以是空字串)
    let im = match caps.get(2) {
        None => 0.0,
        Some(sign) => {
            let magnitude = match caps.get(3) {
                Some(m) => parse_number(input, m.as_str())?,
                None => 1.0,
            };
            signed(sign.as_str(), magnitude)
        }
    };

    Ok(Complex::new(re, im))
}

/// 解析失敗或沒有輸入時回傳 `default`
pub fn parse_complex(input: Option<&str>, default: Complex, locale: NumberLocale) -> Complex {
    let Some(input) = input else {
        return default;
    };

    match try_parse_complex(input, locale) {
        Ok(z) => z,
        Err(e) => {
            tracing::warn!("⚠️ Cannot parse '{}', falling back to {}: {}", input, default, e);
            default
        }
    }
}

/// 以 `;` 分隔的係數列表，最高次項在前
pub fn parse_coefficients(input: &str, locale: NumberLocale) -> Result<Vec<Complex>> {
    input
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(|part| try_parse_complex(part, locale))
        .collect()
}
