//! vCard 3.0 export of a card.

use chrono::{DateTime, SecondsFormat, Utc};

use super::CardData;

/// Render `card` as a vCard 3.0 document stamped with `rev`.
pub fn generate_vcard(card: &CardData, rev: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    let mut words = card.name.split(' ');
    let first = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();
    lines.push(format!("FN:{}", card.name));
    lines.push(format!("N:{};{};;;", rest.join(" "), first));

    if !card.title.is_empty() {
        lines.push(format!("TITLE:{}", card.title));
    }
    if !card.email.is_empty() {
        lines.push(format!("EMAIL;type=INTERNET,PREF:{}", card.email));
    }
    if !card.phone.is_empty() {
        lines.push(format!("TEL;type=CELL,VOICE:{}", card.phone));
    }
    if !card.website.is_empty() {
        lines.push(format!("URL:{}", card.website));
    }

    match (&card.profile_picture_url, &card.profile_picture) {
        (Some(url), _) if !url.is_empty() => lines.push(format!("PHOTO;VALUE=URI:{url}")),
        (_, Some(picture)) if !picture.is_empty() => {
            lines.push(format!("PHOTO;ENCODING=b;TYPE=WEBP:{}", photo_payload(picture)))
        }
        _ => {}
    }

    for link in card.social_links.iter().filter(|l| !l.url.is_empty()) {
        lines.push(format!("item{}.URL;type={}:{}", link.id, link.kind, link.url));
        lines.push(format!("item{}.X-ABLabel:{}", link.id, link.kind));
    }

    let answered: Vec<String> = card
        .fun_facts
        .iter()
        .filter(|f| !f.answer.is_empty())
        .map(|f| format!("Q: {}\\nA: {}\\n\\n", f.question, f.answer))
        .collect();
    if !answered.is_empty() {
        let notes = format!("Fun Facts:\\n{}", answered.concat());
        lines.push(format!("NOTE:{}", notes.replace('\n', "\\n")));
    }

    lines.push(format!(
        "REV:{}",
        rev.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// Download file name for a card's vCard.
pub fn vcard_file_name(card: &CardData) -> String {
    let stem: String = card
        .name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{stem}_FancyFam.vcf")
}

/// Strip a `data:<mime>;base64,` prefix, leaving the bare payload.
fn photo_payload(picture: &str) -> &str {
    if picture.starts_with("data:") {
        if let Some((_, payload)) = picture.split_once(',') {
            return payload;
        }
    }
    picture
}
