//! Prompt templates for school-record generation
//!
//! Every number embedded in a prompt comes from `compute_prompt_budget`.

use saenggibu_text::compute_prompt_budget;
use serde::{Deserialize, Serialize};

/// Base system role
pub const SYSTEM_PROMPT: &str =
    "선생님을 돕는 전문가로서 학생들의 학교생활기록부 작성을 도와줍니다.";

/// Trailer that asks the model not to leak meta commentary
pub const NO_META_TRAILER: &str = r#"**절대 분석 내용이나 검증 포인트를 출력하지 마세요.**
**절대로 "(약 500자)", "--- 330자" 같은 글자수나 메타 정보를 출력하지 마세요.**
**어떤 부가 설명도 없이 본문만 출력합니다.**"#;

/// System message with optional top-priority instructions
pub fn system_message(additional_instructions: Option<&str>) -> String {
    match additional_instructions.map(str::trim).filter(|s| !s.is_empty()) {
        Some(extra) => format!("{}\n\n【최우선 지침】\n{}", SYSTEM_PROMPT, extra),
        None => SYSTEM_PROMPT.to_string(),
    }
}

/// Length instruction block for a target character count
pub fn character_guideline(target_chars: usize) -> String {
    let budget = compute_prompt_budget(target_chars);
    let max_allowed = budget.ceiling;
    let target = budget.prompt_target;

    let rules = if target_chars <= 100 {
        format!(
            "1. 정확히 {target}자 내외로 작성하세요.\n\
             2. 반드시 2~3개의 짧은 문장으로만 구성하세요.\n\
             3. 모든 문장은 '~함.', '~음.', '~임.' 등 완전한 종결어미로 끝내세요."
        )
    } else if target_chars <= 200 {
        format!(
            "1. {target}자 내외로 작성하세요.\n\
             2. 4~5개의 짧은 문장으로 구성하세요.\n\
             3. 모든 문장은 완전한 종결어미(~함, ~음, ~임, ~됨)와 마침표로 끝내세요."
        )
    } else {
        format!(
            "1. 목표 범위: {target}자 이상 ~ {max_allowed}자 이하 (초과 절대 불가)\n\
             2. {max_allowed}자를 초과하면 문장을 줄여서 다시 작성하세요.\n\
             3. 모든 문장은 완전한 종결어미로 끝나야 하며 마지막 문장이 중간에 끊기면 안 됩니다."
        )
    };

    format!(
        "###### [글자 수 제한 조건 - 최우선 준수 사항] ######\n\
         ** 절대 규칙: 공백 포함 전체 글자 수가 {max_allowed}자를 절대로 초과해서는 안 됩니다. **\n\n\
         {rules}\n\n\
         ** 최종 출력은 반드시 {max_allowed}자 이하이고, 완전한 문장으로 끝나야 합니다. **"
    )
}

/// Which school-record section is being written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// 과목별 세부능력 및 특기사항 (과세특)
    #[default]
    SubjectDetail,
    /// 동아리 활동 특기사항
    Club,
    /// 행동특성 및 종합의견 (행발)
    Behavior,
    /// 가정통신문 (종합의견)
    Letter,
}

impl RecordKind {
    /// Korean name of the section
    pub fn label(&self) -> &'static str {
        match self {
            Self::SubjectDetail => "과목별 세부능력 및 특기사항",
            Self::Club => "동아리 활동 특기사항",
            Self::Behavior => "행동특성 및 종합의견",
            Self::Letter => "가정통신문(종합의견)",
        }
    }

    fn style_rules(&self) -> &'static str {
        match self {
            Self::SubjectDetail => {
                "- '학생은' 등의 주어를 쓰지 말고 활동 내용으로 바로 시작할 것.\n\
                 - 명사형 종결어미(~함, ~임 등)를 사용하고 과정 중심으로 서술할 것."
            }
            Self::Club => {
                "- 동아리명을 언급하지 말고 활동 내용부터 시작할 것.\n\
                 - 적극성, 성실성, 리더십, 협업 능력이 드러나도록 명사형 종결어미로 서술할 것."
            }
            Self::Behavior => {
                "- 관찰된 행동을 근거로 인성과 태도를 구체적으로 서술할 것.\n\
                 - 명사형 종결어미(~함, ~임 등)를 사용할 것."
            }
            Self::Letter => {
                "- 편지 형식이 아닌 하나의 문단으로 성장과 노력을 따뜻하게 기술할 것.\n\
                 - 과목명, 점수, 주어를 쓰지 말고 모든 문장을 마침표로 끝낼 것."
            }
        }
    }
}

/// Target school level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolLevel {
    Elementary,
    #[default]
    Middle,
    High,
}

impl SchoolLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Elementary => "초등학생",
            Self::Middle => "중학생",
            Self::High => "고등학생",
        }
    }
}

/// Achievement grade used to adjust the tone of subject records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
}

impl Grade {
    fn tone(&self) -> &'static str {
        match self {
            Self::A => "등급: A (탁월함) - 심화된 탐구와 융합적 사고가 드러나도록 작성하세요.",
            Self::B => "등급: B (우수함) - 최상급 표현을 줄이고 성실한 과제 수행을 중심으로 작성하세요.",
            Self::C => "등급: C (발전가능성) - 잘한 점과 아쉬운 점을 균형 있게, 긍정적인 어조로 작성하세요.",
        }
    }
}

/// Season of a home letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Summer,
    Winter,
}

/// Inputs of one record prompt
#[derive(Debug, Clone, Default)]
pub struct RecordPrompt<'a> {
    pub kind: RecordKind,
    pub school_level: SchoolLevel,
    /// Subject, program or club name
    pub subject: Option<&'a str>,
    pub grade: Option<Grade>,
    pub season: Season,
    /// Selected activity notes
    pub activities: &'a [String],
    pub individual_activity: Option<&'a str>,
    pub target_chars: usize,
}

/// Build the user prompt for a record
pub fn record_prompt(p: &RecordPrompt<'_>) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "당신은 {} 교사로서 학교생활기록부 '{}'을(를) 작성하는 전문가입니다.\n\
         입력된 내용 외의 사실은 절대 만들어내지 마세요.",
        p.school_level.label(),
        p.kind.label()
    ));

    if let Some(subject) = p.subject.map(str::trim).filter(|s| !s.is_empty()) {
        sections.push(format!("과목/프로그램명: {}", subject));
    }

    if p.kind == RecordKind::Letter {
        let period = match p.season {
            Season::Summer => "한 학기 동안의 성장과 여름방학 동안 가정에서 지도할 점",
            Season::Winter => "일년 동안의 성장과 겨울방학 및 새 학기 준비를 위해 가정에서 지도할 점",
        };
        sections.push(format!("작성 목표: {}을 기술하세요.", period));
    }

    let notes = p
        .activities
        .iter()
        .map(|a| format!("- {}", a))
        .collect::<Vec<_>>()
        .join("\n");
    sections.push(format!("입력된 활동 내용:\n{}", notes));

    if let Some(individual) = p.individual_activity.map(str::trim).filter(|s| !s.is_empty()) {
        sections.push(format!(
            "## 이 학생의 개별 활동 (특히 강조해서 작성할 것):\n- {}",
            individual
        ));
    }

    if let (RecordKind::SubjectDetail, Some(grade)) = (p.kind, p.grade) {
        sections.push(grade.tone().to_string());
    }

    sections.push(format!("작성 주의사항:\n{}", p.kind.style_rules()));
    sections.push(character_guideline(p.target_chars));
    sections.push(NO_META_TRAILER.to_string());

    sections.join("\n\n")
}
