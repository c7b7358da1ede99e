//! Hebrew text helpers: vowel-point stripping and gematria numerals.

const UNITS: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];
const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
const HUNDREDS: [char; 4] = ['ק', 'ר', 'ש', 'ת'];

/// Range of cantillation marks and vowel points
fn is_nikud(c: char) -> bool {
    ('\u{0591}'..='\u{05C7}').contains(&c)
}

/// Strip nikud and cantillation marks, leaving letters and punctuation
pub fn remove_nikud(text: &str) -> String {
    text.chars().filter(|c| !is_nikud(*c)).collect()
}

/// Strip nikud and surrounding whitespace
pub fn normalize_hebrew(text: &str) -> String {
    remove_nikud(text).trim().to_string()
}

/// Render 1..=999 as a Hebrew numeral (`1` -> `א`, `15` -> `טו`).
///
/// Returns `None` outside that range.
pub fn to_gematria(n: u32) -> Option<String> {
    if n == 0 || n > 999 {
        return None;
    }

    let mut out = String::new();
    let mut hundreds = n / 100;
    while hundreds >= 4 {
        out.push('ת');
        hundreds -= 4;
    }
    if hundreds > 0 {
        out.push(HUNDREDS[(hundreds - 1) as usize]);
    }

    // 15 and 16 are written 9+6 and 9+7 to avoid spelling the divine name
    match n % 100 {
        15 => out.push_str("טו"),
        16 => out.push_str("טז"),
        rest => {
            let (tens, units) = (rest / 10, rest % 10);
            if tens > 0 {
                out.push(TENS[(tens - 1) as usize]);
            }
            if units > 0 {
                out.push(UNITS[(units - 1) as usize]);
            }
        }
    }

    Some(out)
}

fn letter_value(c: char) -> Option<u32> {
    if let Some(i) = UNITS.iter().position(|&u| u == c) {
        return Some(i as u32 + 1);
    }
    if let Some(i) = TENS.iter().position(|&t| t == c) {
        return Some((i as u32 + 1) * 10);
    }
    if let Some(i) = HUNDREDS.iter().position(|&h| h == c) {
        return Some((i as u32 + 1) * 100);
    }
    match c {
        'ך' => Some(20),
        'ם' => Some(40),
        'ן' => Some(50),
        'ף' => Some(80),
        'ץ' => Some(90),
        _ => None,
    }
}

/// Parse a Hebrew numeral back to an integer.
///
/// Geresh, gershayim, ASCII quotes, and whitespace are ignored. Returns
/// `None` for empty input, any other character, or a sum past `u32::MAX`.
pub fn parse_gematria(text: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut seen = false;

    for c in text.chars() {
        if matches!(c, '\'' | '"' | '׳' | '״') || c.is_whitespace() {
            continue;
        }
        total = total.checked_add(letter_value(c)?)?;
        seen = true;
    }

    seen.then_some(total)
}
