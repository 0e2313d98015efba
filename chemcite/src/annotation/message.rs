use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The language messages are written in. This never changes how text is parsed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Language {
    /// English
    #[default]
    #[serde(rename = "en", alias = "english", alias = "English")]
    English,
    /// Simplified Chinese
    #[serde(rename = "zh", alias = "chinese", alias = "Chinese")]
    Chinese,
}

impl FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "zh" | "cn" | "chinese" => Ok(Self::Chinese),
            _ => Err(format!("Unknown language '{s}', use 'en' or 'zh'")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::English => write!(f, "en"),
            Self::Chinese => write!(f, "zh"),
        }
    }
}

/// All messages the parsers can attach to an annotation
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Message<'a> {
    H1Format,
    UnknownSolvent(&'a str),
    InvalidFrequency(&'a str),
    NoPeaks,
    PeakFormat,
    PeakUnterminated,
    HydrogenCount,
    CouplingCount {
        symbol: &'a str,
        expected: usize,
        found: usize,
    },
    RangeOrder,
    NeedsInterval,
    NeedsSingle,
    ShouldNotCarryJ,
    MissingJ,
    JRounded(&'a str),
    UnknownMultiplicity(&'a str),
    HrmsFormat,
    UnknownSource(&'a str),
    UnknownIon(&'a str),
    NegativeAdduct,
    Separator(&'a str),
    InvalidFormula(&'a str),
    ExactDecimals,
    FoundDecimals,
    Tolerance(f64),
    Consistency(f64),
    WeightDecimals,
    YieldDecimals,
    Verified(f64),
}

impl Message<'_> {
    pub(crate) fn localize(&self, language: Language) -> String {
        match language {
            Language::English => self.english(),
            Language::Chinese => self.chinese(),
        }
    }

    fn english(&self) -> String {
        match self {
            Self::H1Format => "This line does not look like a 1H NMR description, expected something like '1H NMR (400 MHz, CDCl3) δ 7.26 (s, 1H).'".to_string(),
            Self::UnknownSolvent(s) => format!("The solvent '{s}' is not known"),
            Self::InvalidFrequency(s) => format!("The frequency '{s}' is not a valid positive number"),
            Self::NoPeaks => "No peaks could be found after the header".to_string(),
            Self::PeakFormat => "This peak could not be read, expected something like '7.26 (d, J = 8.0 Hz, 2H)'".to_string(),
            Self::PeakUnterminated => "This peak is not closed, expected it to end with the hydrogen count like '2H)'".to_string(),
            Self::HydrogenCount => "The hydrogen count has to be a positive number".to_string(),
            Self::CouplingCount { symbol, expected, found } => format!(
                "The multiplicity '{symbol}' expects {expected} coupling constant{}, but {found} {} given",
                if *expected == 1 { "" } else { "s" },
                if *found == 1 { "was" } else { "were" },
            ),
            Self::RangeOrder => "A shift range must be reported low to high".to_string(),
            Self::NeedsInterval => "This multiplicity needs a shift interval".to_string(),
            Self::NeedsSingle => "This multiplicity needs a single shift value".to_string(),
            Self::ShouldNotCarryJ => "This multiplicity should not carry coupling constants".to_string(),
            Self::MissingJ => "This multiplicity requires coupling constants".to_string(),
            Self::JRounded(original) => format!(
                "The coupling constants were rounded to the digital resolution of the spectrometer, originally reported as {original} Hz"
            ),
            Self::UnknownMultiplicity(s) => format!(
                "The multiplicity '{s}' is not known, it was changed into a multiplet, please correct the shift range manually"
            ),
            Self::HrmsFormat => "This line does not look like a HRMS description, expected something like 'HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.'".to_string(),
            Self::UnknownSource(s) => format!("The ionization source '{s}' is not known"),
            Self::UnknownIon(s) => format!("The counter ion '{s}' is not known, use H, Na, K, or Cs"),
            Self::NegativeAdduct => "Only positive adducts like [M + H]+ are supported".to_string(),
            Self::Separator(s) => format!("The ion has to be separated with ' + ', not '{s}'"),
            Self::InvalidFormula(reason) => format!("The formula is not valid: {reason}"),
            Self::ExactDecimals => "The calculated mass has to be reported with exactly 4 decimals".to_string(),
            Self::FoundDecimals => "The found mass has to be reported with exactly 4 decimals".to_string(),
            Self::Tolerance(difference) => format!(
                "The found mass deviates {difference:.4} from the calculated mass, which is more than 0.003"
            ),
            Self::Consistency(calculated) => format!(
                "The reported calculated mass does not match the formula, it should be {calculated:.4}"
            ),
            Self::WeightDecimals => "The weight has to be reported in mg with exactly 1 decimal".to_string(),
            Self::YieldDecimals => "The yield has to be reported as a whole percentage".to_string(),
            Self::Verified(calculated) => format!("Verified, the calculated mass is {calculated:.4}"),
        }
    }

    fn chinese(&self) -> String {
        match self {
            Self::H1Format => "此行不是有效的氢谱描述，格式应类似于 '1H NMR (400 MHz, CDCl3) δ 7.26 (s, 1H).'".to_string(),
            Self::UnknownSolvent(s) => format!("未知溶剂 '{s}'"),
            Self::InvalidFrequency(s) => format!("频率 '{s}' 不是有效的正数"),
            Self::NoPeaks => "标题后未找到任何峰".to_string(),
            Self::PeakFormat => "无法识别此峰，格式应类似于 '7.26 (d, J = 8.0 Hz, 2H)'".to_string(),
            Self::PeakUnterminated => "此峰未正确结束，应以氢原子数结尾，例如 '2H)'".to_string(),
            Self::HydrogenCount => "氢原子数必须为正整数".to_string(),
            Self::CouplingCount { symbol, expected, found } => format!(
                "峰型 '{symbol}' 需要 {expected} 个耦合常数，但给出了 {found} 个"
            ),
            Self::RangeOrder => "化学位移区间必须从低到高书写".to_string(),
            Self::NeedsInterval => "此峰型需要化学位移区间".to_string(),
            Self::NeedsSingle => "此峰型需要单一化学位移值".to_string(),
            Self::ShouldNotCarryJ => "此峰型不应包含耦合常数".to_string(),
            Self::MissingJ => "此峰型需要耦合常数".to_string(),
            Self::JRounded(original) => format!("耦合常数已按仪器分辨率修约，原始值为 {original} Hz"),
            Self::UnknownMultiplicity(s) => format!("未知峰型 '{s}'，已改为多重峰，请手动修改化学位移区间"),
            Self::HrmsFormat => "此行不是有效的高分辨质谱描述，格式应类似于 'HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.'".to_string(),
            Self::UnknownSource(s) => format!("未知离子源 '{s}'"),
            Self::UnknownIon(s) => format!("未知加合离子 '{s}'，请使用 H、Na、K 或 Cs"),
            Self::NegativeAdduct => "仅支持正离子加合物，例如 [M + H]+".to_string(),
            Self::Separator(s) => format!("离子之间应使用 ' + ' 分隔，而不是 '{s}'"),
            Self::InvalidFormula(reason) => format!("分子式无效：{reason}"),
            Self::ExactDecimals => "计算值必须保留 4 位小数".to_string(),
            Self::FoundDecimals => "实测值必须保留 4 位小数".to_string(),
            Self::Tolerance(difference) => format!("实测值与计算值相差 {difference:.4}，超过 0.003"),
            Self::Consistency(calculated) => format!("报告的计算值与分子式不符，应为 {calculated:.4}"),
            Self::WeightDecimals => "质量必须以 mg 为单位并保留 1 位小数".to_string(),
            Self::YieldDecimals => "产率必须为整数百分比".to_string(),
            Self::Verified(calculated) => format!("校验通过，计算值为 {calculated:.4}"),
        }
    }
}
