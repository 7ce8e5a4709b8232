use serde_json::{json, Value};

/// Written where the dashboard looks on startup.
const OUTPUT_PATH: &str = "final_ochka_dirty.json";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Quote a string the way Python's `repr()` does for plain text.
fn python_repr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // unmapped codes ("bio") stay in the data on purpose
    let subjects = ["inf", "fr", "bio"];
    let prompts = [
        "Установи соответствие между терминами и определениями.",
        "Расположи события в хронологическом порядке.",
        "Укажи последовательность действий алгоритма.",
        "Выберите несколько верных утверждений.",
        "Выберите один правильный вариант.",
        "Отметьте один вариант из списка.",
        "Впишите пропущенное слово.",
        "Запишите ответ в виде числа.",
        "Рассмотрите схему.\nЧто на ней изображено?",
    ];

    let rows: Vec<Value> = (0..120)
        .map(|id| {
            let subject = *rng.pick(&subjects);
            let solution = if rng.chance(10) {
                Value::Null
            } else {
                let text = *rng.pick(&prompts);
                Value::String(format!("{{'text': {}, 'images': []}}", python_repr(text)))
            };
            json!({
                "id": id,
                "subject": subject,
                "solution": solution,
            })
        })
        .collect();

    let text = serde_json::to_string_pretty(&rows).expect("Failed to serialise sample");
    std::fs::write(OUTPUT_PATH, text).expect("Failed to write output file");

    println!("Wrote {} questions to {OUTPUT_PATH}", rows.len());
}
