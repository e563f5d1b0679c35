//! The `oefenen init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("oefenen.toml").exists() {
        println!("oefenen.toml already exists, skipping.");
    } else {
        std::fs::write("oefenen.toml", SAMPLE_CONFIG)?;
        println!("Created oefenen.toml");
    }

    std::fs::create_dir_all("exercises")?;
    let example_path = std::path::Path::new("exercises/example.toml");
    if example_path.exists() {
        println!("exercises/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXERCISE)?;
        println!("Created exercises/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit oefenen.toml with your API key");
    println!("  2. Run: oefenen validate --exercise exercises/example.toml");
    println!("  3. Run: oefenen grade --exercise exercises/example.toml --answers answers.json");
    println!("  4. Run: oefenen serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# oefenen configuration

bind = "127.0.0.1:3000"

[chat]
api_key = "${OPENAI_API_KEY}"
base_url = "https://api.openai.com"
timeout_secs = 60

[news]
allowed_hosts = ["feeds.nos.nl", "www.nu.nl", "www.rtlnieuws.nl", "feeds.rtl.nl"]
timeout_secs = 15
cache_max_age_secs = 300
"#;

const EXAMPLE_EXERCISE: &str = r#"[exercise]
id = "kennismaken"
title = "Kennismaken"
level = "A1"
topic = "jezelf voorstellen"
introduction = "Oefen zinnen om jezelf voor te stellen."
explanation = "Bij 'ik' hoort de stam van het werkwoord: ik heet, ik woon, ik werk."

[[questions]]
id = "q1"
type = "fill"
question = "Ik ___ Anna. (heten)"
correct_answer = "heet"

[[questions]]
id = "q2"
type = "multiple-choice"
question = "___ boek ligt op tafel."
options = ["De", "Het"]
correct_answer = "Het"
explanation = "Boek is een het-woord."

[[questions]]
id = "q3"
type = "checkbox"
question = "Welke woorden zijn de-woorden?"
options = ["tafel", "huis", "stoel", "boek"]
correct_answer = ["tafel", "stoel"]

[[questions]]
id = "q4"
type = "swipe-sort"
question = "Sorteer de woorden: de of het?"
targets = ["de", "het"]
correct_answer = ["de", "het"]

[[questions.items]]
text = "man"
target = "de"

[[questions.items]]
text = "kind"
target = "het"

[[questions]]
id = "q5"
type = "memory-match"
question = "Zoek de paren."
correct_answer = ["hallo", "dag"]

[[questions.pairs]]
left = "hallo"
right = "hello"

[[questions.pairs]]
left = "dag"
right = "bye"

[[questions]]
id = "q6"
type = "jigsaw"
question = "Maak een zin."
pieces = ["Ik", "woon", "in Utrecht"]
correct_order = [0, 1, 2]
correct_answer = ["0", "1", "2"]

[[questions]]
id = "q7"
type = "dictation"
question = "Schrijf op wat je hoort."
audio_text = "Goedemorgen, hoe gaat het?"
correct_answer = "Goedemorgen, hoe gaat het?"

[[questions]]
id = "q8"
type = "image-description"
question = "Wat zie je op de foto?"
image_url = "https://example.com/fiets.jpg"
correct_answer = "een fiets"

[[questions]]
id = "q9"
type = "transformation"
question = "Maak de zin vragend: Jij woont in Leiden."
correct_answer = "Woon jij in Leiden?"

[[questions]]
id = "q10"
type = "word-math"
question = "fiets + pad = ?"
parts = ["fiets", "pad"]
correct_answer = "fiets|pad"
explanation = "Fiets en pad samen maken fietspad."
"#;
