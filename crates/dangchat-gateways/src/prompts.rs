//! Per-mode prompt and response-schema builders.
//!
//! The system instruction fixes the persona and the strict-JSON contract;
//! the user prompt carries the birth data and the mode's ask; the schema is
//! sent as the Gemini response schema so the shape is enforced server-side.

use serde_json::{json, Value};

use dangchat_core::{Mode, OracleRequest, SajuProfile};

const SYSTEM_INSTRUCTION: &str = "You are a traditional Korean Shaman (Mudang). \
You provide fortune telling based on Saju (Four Pillars of Destiny). \
Your output must be strictly in JSON format matching the schema.";

/// Everything one Gemini call needs.
#[derive(Debug, Clone)]
pub struct PromptParts {
    pub system: String,
    pub user: String,
    pub schema: Value,
}

/// Build the prompt triple for a request.
pub fn for_request(request: &OracleRequest) -> PromptParts {
    let mut user = String::new();
    user.push_str(
        "당신은 대한민국에서 가장 용하다고 소문난 신점 도사입니다. \
         말투는 예스럽고 권위 있게, 실제 점집에서 듣는 듯한 표현을 쓰십시오. \
         좋은 점은 격려하고, 나쁜 점은 피해갈 방도를 넌지시 일러주십시오.\n\n",
    );
    push_profile(&mut user, "사용자 정보", &request.profile);
    if let Some(partner) = &request.partner {
        push_profile(&mut user, "상대방 정보", partner);
    }
    user.push_str(mode_ask(request.mode));

    PromptParts {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
        schema: mode_schema(request.mode),
    }
}

fn push_profile(out: &mut String, heading: &str, profile: &SajuProfile) {
    out.push_str(&format!("[{}]\n", heading));
    out.push_str(&format!("이름: {}\n", profile.name));
    out.push_str(&format!("성별: {}\n", profile.gender.korean()));
    out.push_str(&format!("생년월일: {}\n", profile.birth_date));
    out.push_str(&format!("태어난 시간: {}\n", profile.birth_time.korean()));
    out.push_str(&format!("양력/음력: {}\n", profile.calendar_type.korean()));
    if !profile.birth_region.trim().is_empty() {
        out.push_str(&format!("출생지: {}\n", profile.birth_region));
    }
    out.push('\n');
}

fn mode_ask(mode: Mode) -> &'static str {
    match mode {
        Mode::Manse => {
            "사주 원국을 만세력으로 풀어주세요. 연주/월주/일주/시주의 천간과 지지, \
             십성과 운성, 신살, 오행 분포와 과부족, 신강/신약 판단, 대운 흐름, \
             그리고 성격/올해의 운/조언을 모두 채워주세요."
        }
        Mode::Chongun => {
            "타고난 총운을 풀어주세요. 한 줄 요약과 키워드, 그리고 \
             나의 시선/타인의 시선/재능/재물/애정/일/건강 일곱 항목을 각각 풀어주세요."
        }
        Mode::Gunghap => {
            "두 사람의 궁합을 풀어주세요. 100점 만점 점수와 요약, \
             성격/가치관/연애 스타일/갈등 해결의 세부 궁합, 좋은 점과 주의할 점, \
             그리고 조언을 주세요."
        }
        Mode::Lotto => {
            "사주에 부족한 기운을 채우는 행운의 로또 번호 6개(1~45)를 골라주세요. \
             행운의 색과 방위, 그리고 그 번호를 고른 이유를 함께 주세요."
        }
        Mode::CelebMatch => {
            "사주와 찰떡궁합인 이성 연예인 한 명을 골라주세요. 이름과 직업, \
             100점 만점 궁합 점수, 어울리는 이유, 키워드, 두 사람의 오행을 주세요."
        }
        Mode::Travel => {
            "부족한 오행 기운을 채워줄 여행지를 추천해주세요. 오행 분석과 함께 \
             국내 한 곳, 해외 한 곳을 장소/지역/이유/추천 활동으로 주시고, \
             여행 팁 하나를 덧붙여주세요."
        }
        Mode::Samjae => {
            "삼재 여부를 풀어주세요. 띠 동물과 현재 상태(삼재 아님/들삼재/눌삼재/날삼재), \
             들/눌/날삼재 연도, 삼재의 의미와 주의할 점 세 가지, 액막이 비방, \
             그리고 복삼재 여부를 주세요."
        }
    }
}

// Gemini response-schema fragments.

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn boolean() -> Value {
    json!({ "type": "BOOLEAN" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn stem_glyph() -> Value {
    object(
        json!({
            "char": string(), "hangul": string(), "color": string(),
            "element": string(), "tenGod": string(),
        }),
        &["char", "hangul", "color", "element", "tenGod"],
    )
}

fn branch_glyph() -> Value {
    object(
        json!({
            "char": string(), "hangul": string(), "color": string(),
            "element": string(), "tenGod": string(), "animal": string(),
        }),
        &["char", "hangul", "color", "element", "tenGod", "animal"],
    )
}

fn pillar() -> Value {
    object(
        json!({
            "stem": stem_glyph(), "branch": branch_glyph(),
            "shipseong": string_array(), "unseong": string(), "sinsal": string_array(),
        }),
        &["stem", "branch", "shipseong", "unseong", "sinsal"],
    )
}

fn four_strings(keys: [&str; 4]) -> Value {
    object(
        json!({
            (keys[0]): string(),
            (keys[1]): string(),
            (keys[2]): string(),
            (keys[3]): string(),
        }),
        &keys,
    )
}

fn manse_schema() -> Value {
    object(
        json!({
            "userInfo": object(
                json!({ "animal": string(), "color": string(), "element": string() }),
                &["animal", "color", "element"],
            ),
            "pillars": object(
                json!({ "year": pillar(), "month": pillar(), "day": pillar(), "time": pillar() }),
                &["year", "month", "day", "time"],
            ),
            "pillarAnalysis": four_strings(["year", "month", "day", "time"]),
            "ohaeng": object(
                json!({
                    "wood": number(), "fire": number(), "earth": number(),
                    "metal": number(), "water": number(),
                    "missing": string_array(), "excess": string_array(),
                }),
                &["wood", "fire", "earth", "metal", "water", "missing", "excess"],
            ),
            "shipseong": object(
                json!({
                    "bi": number(), "sik": number(), "jae": number(),
                    "gwan": number(), "in": number(),
                }),
                &["bi", "sik", "jae", "gwan", "in"],
            ),
            "strength": object(
                json!({ "score": number(), "label": string(), "description": string() }),
                &["score", "label", "description"],
            ),
            "daewoon": json!({
                "type": "ARRAY",
                "items": object(
                    json!({
                        "age": number(), "stem": string(), "stemHangul": string(),
                        "branch": string(), "branchHangul": string(), "tenGod": string(),
                    }),
                    &["age", "stem", "stemHangul", "branch", "branchHangul", "tenGod"],
                ),
            }),
            "analysis": object(
                json!({
                    "personality": string(), "currentYearLuck": string(), "advice": string(),
                }),
                &["personality", "currentYearLuck", "advice"],
            ),
        }),
        &[
            "userInfo",
            "pillars",
            "pillarAnalysis",
            "ohaeng",
            "shipseong",
            "strength",
            "daewoon",
            "analysis",
        ],
    )
}

fn chongun_schema() -> Value {
    object(
        json!({
            "userName": string(),
            "summary": string(),
            "keywords": string_array(),
            "sections": object(
                json!({
                    "selfView": string(), "othersView": string(), "talent": string(),
                    "wealth": string(), "love": string(), "work": string(), "health": string(),
                }),
                &["selfView", "othersView", "talent", "wealth", "love", "work", "health"],
            ),
            "advice": string(),
        }),
        &["userName", "summary", "keywords", "sections", "advice"],
    )
}

fn gunghap_schema() -> Value {
    object(
        json!({
            "score": number(),
            "summary": string(),
            "details": object(
                json!({
                    "personalityMatch": string(), "valueMatch": string(),
                    "loveStyle": string(), "conflictResolution": string(),
                }),
                &["personalityMatch", "valueMatch", "loveStyle", "conflictResolution"],
            ),
            "goodPoints": string_array(),
            "badPoints": string_array(),
            "advice": string(),
        }),
        &["score", "summary", "details", "goodPoints", "badPoints", "advice"],
    )
}

fn lotto_schema() -> Value {
    object(
        json!({
            "luckyNumbers": json!({ "type": "ARRAY", "items": number() }),
            "luckyColor": string(),
            "direction": string(),
            "reason": string(),
        }),
        &["luckyNumbers", "luckyColor", "direction", "reason"],
    )
}

fn celeb_match_schema() -> Value {
    object(
        json!({
            "celebrityName": string(),
            "celebrityJob": string(),
            "compatibilityScore": number(),
            "matchReason": string(),
            "keywords": string_array(),
            "userElement": string(),
            "celebElement": string(),
        }),
        &[
            "celebrityName",
            "celebrityJob",
            "compatibilityScore",
            "matchReason",
            "keywords",
            "userElement",
            "celebElement",
        ],
    )
}

fn travel_schema() -> Value {
    object(
        json!({
            "elementAnalysis": string(),
            "domestic": four_strings(["place", "location", "reason", "activity"]),
            "international": four_strings(["place", "country", "reason", "activity"]),
            "travelTip": string(),
        }),
        &["elementAnalysis", "domestic", "international", "travelTip"],
    )
}

fn samjae_schema() -> Value {
    object(
        json!({
            "userAnimal": string(),
            "currentStatus": string(),
            "years": object(
                json!({ "deul": number(), "nul": number(), "nal": number() }),
                &["deul", "nul", "nal"],
            ),
            "analysis": object(
                json!({ "meaning": string(), "caution": string_array(), "remedy": string() }),
                &["meaning", "caution", "remedy"],
            ),
            "isGoodSamjae": boolean(),
        }),
        &["userAnimal", "currentStatus", "years", "analysis", "isGoodSamjae"],
    )
}

fn mode_schema(mode: Mode) -> Value {
    match mode {
        Mode::Manse => manse_schema(),
        Mode::Chongun => chongun_schema(),
        Mode::Gunghap => gunghap_schema(),
        Mode::Lotto => lotto_schema(),
        Mode::CelebMatch => celeb_match_schema(),
        Mode::Travel => travel_schema(),
        Mode::Samjae => samjae_schema(),
    }
}
