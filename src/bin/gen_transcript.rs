//! Synthetic transcript generator for stress testing chatstats.
//!
//! Usage: cargo run --features gen-test --bin gen_transcript -- [messages] [output]
//! Example: cargo run --features gen-test --bin gen_transcript -- 100000 heavy_chat.txt

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "😘", "🤔", "🙄", "😱", "🤯", "💀", "👻", "🎃", "🤖", "👽",
    "🦄", "🐉", "🌈", "⚡", "🔥", "💩", "👍", "❤️", "💔", "🏳️‍🌈", "🇰🇿", "👨‍👩‍👧‍👦", "🧑‍🚀", "🏊‍♂️",
    "🤷‍♀️", "👋🏽",
];

const SENDERS: &[&str] = &[
    "Alice",
    "bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "Victor Hugo",
    "vic",
    "🔥FireUser🔥",
    "\u{200E}Anna",
];

const SYSTEM_LINES: &[&str] = &[
    "WhatsApp: Messages and calls are end-to-end encrypted.",
    "Alice changed the subject to \"Trip\": ok",
    "System: Bob left",
];

const WORDS: &[&str] = &[
    "hello", "there", "friend", "see", "you", "tomorrow", "ok", "лол", "привет", "真的", "yes",
    "no", "maybe", "https://example.com", "12:30", "k",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    // Mix of header styles
    let formats = [
        |i: usize| format!("{}/{}/2023, {}:{:02} AM -", (i % 28) + 1, (i % 12) + 1, (i % 12) + 1, i % 60),
        |i: usize| format!("{:02}.{:02}.24, {}:{:02} -", (i % 28) + 1, (i % 12) + 1, i % 24, i % 60),
        |i: usize| format!("[{}/{:02}/2022, {:02}:{:02}:{:02}]", (i % 28) + 1, (i % 12) + 1, i % 24, i % 60, i % 60),
        |i: usize| format!("{}-{}-2025, {}:{:02} pm -", (i % 28) + 1, (i % 12) + 1, (i % 12) + 1, i % 60),
    ];

    for i in 0..count {
        let timestamp = formats[i % formats.len()](i);

        let line = if i % 997 == 3 {
            format!("{} {}\n", timestamp, SYSTEM_LINES.choose(&mut rng).unwrap_or(&""))
        } else {
            let sender = SENDERS.choose(&mut rng).unwrap_or(&"Alice");
            format!("{} {}: {}\n", timestamp, sender, generate_body(&mut rng, i))
        };
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        // Continuation and garbage lines
        if i % 250 == 100 {
            let extra = generate_garbage_line(&mut rng);
            bytes_written += extra.len();
            writer.write_all(extra.as_bytes())?;
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 10 {
        // Plain words
        0..=4 => {
            let n = rng.gen_range(1..20);
            (0..n)
                .map(|_| *WORDS.choose(rng).unwrap_or(&"ok"))
                .collect::<Vec<_>>()
                .join(" ")
        }

        // Words with emoji glued on
        5 | 6 => {
            let word = WORDS.choose(rng).unwrap_or(&"ok");
            let emoji = EMOJIS.choose(rng).unwrap_or(&"😀");
            format!("{word}{emoji} {word} {emoji}{emoji}")
        }

        // Emoji spam
        7 => (0..rng.gen_range(1..50))
            .map(|_| *EMOJIS.choose(rng).unwrap_or(&"😀"))
            .collect::<Vec<_>>()
            .join(""),

        // Media placeholders
        8 => "<Media omitted>".to_string(),

        // Long message
        _ => {
            let padding: String = (0..rng.gen_range(1_000..10_000)).map(|_| 'x').collect();
            format!("Long message #{}: {}", index, padding)
        }
    }
}

fn generate_garbage_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..5) {
        0 => "\n".to_string(),
        1 => "continuation of the previous message 😂\n".to_string(),
        2 => "31/02/2023, 10:00 - Alice: impossible date\n".to_string(),
        3 => "99:99 - Nobody: not a header\n".to_string(),
        _ => {
            let junk: String = (0..rng.gen_range(10..100))
                .map(|_| rng.gen_range(b'!'..=b'~') as char)
                .collect();
            format!("{}\n", junk)
        }
    }
}
