//! Inflection helpers for root names and type keys.
//!
//! Root names arrive in server conventions (`calendar_days`, `Tasks::Meeting`)
//! and type keys are kept in client conventions (`calendarDay`, `meeting`).
//! The rules below cover the English inflections both sides actually emit;
//! they are not a general-purpose inflector.

/// Words with no distinct plural form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// (singular, plural) pairs that no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("movie", "movies"),
    ("ox", "oxen"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("zombie", "zombies"),
];

/// Suffix rewrites for plural → singular, first match wins.
const SINGULAR_RULES: &[(&str, &str)] = &[
    ("quizzes", "quiz"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("indices", "index"),
    ("aliases", "alias"),
    ("statuses", "status"),
    ("buses", "bus"),
    ("shoes", "shoe"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("parentheses", "parenthesis"),
    ("prognoses", "prognosis"),
    ("synopses", "synopsis"),
    ("theses", "thesis"),
    ("hives", "hive"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("oes", "o"),
];

/// Suffix rewrites for singular → plural, first match wins.
const PLURAL_RULES: &[(&str, &str)] = &[
    ("quiz", "quizzes"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("index", "indices"),
    ("alias", "aliases"),
    ("status", "statuses"),
    ("bus", "buses"),
    ("sis", "ses"),
    ("hive", "hives"),
    ("buffalo", "buffaloes"),
    ("tomato", "tomatoes"),
    ("potato", "potatoes"),
    ("hero", "heroes"),
    ("echo", "echoes"),
    ("x", "xes"),
    ("ch", "ches"),
    ("sh", "shes"),
    ("ss", "sses"),
];

/// Returns the singular form of the last word of `word`.
///
/// `calendar_days` → `calendar_day`, `people` → `person`.
pub fn singularize(word: &str) -> String {
    inflect_last_word(word, singularize_word)
}

/// Returns the plural form of the last word of `word`.
///
/// `calendar_day` → `calendar_days`, `person` → `people`.
pub fn pluralize(word: &str) -> String {
    inflect_last_word(word, pluralize_word)
}

fn singularize_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return (*singular).to_string();
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == word) {
        return word.to_string();
    }
    for (from, to) in SINGULAR_RULES {
        if let Some(stem) = word.strip_suffix(from) {
            return format!("{stem}{to}");
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if ends_with_consonant(stem) || stem.ends_with("qu") {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ves") {
        if stem.ends_with('l') || stem.ends_with('r') {
            return format!("{stem}f");
        }
        if !stem.is_empty() && !stem.ends_with('f') {
            return format!("{stem}fe");
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return word.to_string();
    }
    for (from, to) in PLURAL_RULES {
        if let Some(stem) = word.strip_suffix(from) {
            return format!("{stem}{to}");
        }
    }
    if let Some(stem) = word.strip_suffix('y') {
        if ends_with_consonant(stem) || stem.ends_with("qu") {
            return format!("{stem}ies");
        }
    }
    if let Some(stem) = word.strip_suffix("fe") {
        if !stem.ends_with('f') {
            return format!("{stem}ves");
        }
    }
    if let Some(stem) = word.strip_suffix('f') {
        if stem.ends_with('l') || stem.ends_with('r') {
            return format!("{stem}ves");
        }
    }
    if word.ends_with('s') {
        return word.to_string();
    }
    format!("{word}s")
}

fn ends_with_consonant(stem: &str) -> bool {
    stem.chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic() && !"aeiouy".contains(c.to_ascii_lowercase()))
}

/// Applies `f` to the lowercase last word of `word` and splices the result
/// back, keeping a leading capital if the word had one.
fn inflect_last_word(word: &str, f: fn(&str) -> String) -> String {
    let start = last_word_start(word);
    let (head, tail) = word.split_at(start);
    if tail.is_empty() {
        return word.to_string();
    }
    let lower = tail.to_lowercase();
    let mut inflected = f(&lower);
    if tail.chars().next().is_some_and(char::is_uppercase) {
        inflected = capitalize(&inflected);
    }
    format!("{head}{inflected}")
}

/// Byte offset where the last word begins: after the last separator, or at
/// the last camel-case hump.
fn last_word_start(word: &str) -> usize {
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (i, c) in word.char_indices() {
        if matches!(c, '_' | '-' | '/' | ' ' | '.' | ':') {
            start = i + c.len_utf8();
        } else if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            start = i;
        }
        prev = Some(c);
    }
    start
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower camel case: `calendar_day` → `calendarDay`, `CalendarDay` →
/// `calendarDay`. Path segments separated by `/` are camelized independently.
pub fn camelize(word: &str) -> String {
    word.split('/')
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            let mut upper_next = false;
            for c in segment.chars() {
                if matches!(c, '_' | '-' | '.' | ' ') {
                    upper_next = !out.is_empty();
                    continue;
                }
                if upper_next {
                    out.extend(c.to_uppercase());
                    upper_next = false;
                } else {
                    out.push(c);
                }
            }
            decapitalize(&out)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Upper camel case: `calendar_day` → `CalendarDay`.
pub fn classify(word: &str) -> String {
    camelize(word)
        .split('/')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("/")
}

/// Snake case: `calendarDay` → `calendar_day`, `HTMLParser` → `html_parser`.
pub fn underscore(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '-' | ' ') {
            if !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Strips a module path: `Tasks::Meeting` → `Meeting`.
pub fn demodulize(name: &str) -> &str {
    match name.rfind("::") {
        Some(i) => &name[i + 2..],
        None => name,
    }
}

/// Type key for a payload root name: `calendar_days` → `calendarDay`.
pub fn type_for_root(root: &str) -> String {
    camelize(&singularize(root))
}

/// Type key for an explicit type tag: `Tasks::MeetingTask` → `meetingTask`.
pub fn type_key_for(type_name: &str) -> String {
    type_for_root(demodulize(type_name))
}
