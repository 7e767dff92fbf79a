use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;
use zukei::data::DetectionData;
use zukei::graph::NodeKind;
use zukei::spatial::{BoundingBox, OcrResult, RecognizedText};

const COLUMN_X: f64 = 300.0;
const ROW_HEIGHT: f64 = 100.0;
const BRANCH_OFFSET: f64 = 220.0;
const BOX_WIDTH: f64 = 160.0;
const BOX_HEIGHT: f64 = 50.0;

const ACTIONS: &[&str] = &[
    "Получить заявку",
    "Проверить документы",
    "Рассчитать стоимость",
    "Отправить уведомление",
    "Сохранить результат",
    "Обработка платежа",
];
const INPUTS: &[&str] = &["Ввод данных клиента", "Вывод отчета", "Данные заказа"];
const CONDITIONS: &[&str] = &[
    "Если сумма больше лимита?",
    "Условие: клиент новый",
    "Документы в порядке?",
];

/// A CLI tool to generate detection data for the zukei analyzer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_detections.json")]
    output: String,

    /// Number of elements in the main column, including start and end
    #[arg(long, default_value_t = 8)]
    steps: usize,

    /// Chance that an inner step is a decision with a side branch
    #[arg(long, default_value_t = 0.3)]
    branch_chance: f64,

    /// Maximum random offset applied to each box center, in pixels
    #[arg(long, default_value_t = 15.0)]
    jitter: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.steps < 2 {
        eprintln!("Error: --steps ({}) must be at least 2", cli.steps);
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.branch_chance) {
        eprintln!(
            "Error: --branch-chance ({}) must be between 0 and 1",
            cli.branch_chance
        );
        std::process::exit(1);
    }

    println!(
        "Generating a diagram with {} main steps (branch chance {})...",
        cli.steps, cli.branch_chance
    );

    let data = generate_detections(&mut rng, &cli);
    let json_output = serde_json::to_string_pretty(&data)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} elements and saved them to '{}'",
        data.boxes.len(),
        cli.output
    );

    Ok(())
}

/// Lays the steps out top to bottom. Decisions get a side box to their right
/// on the same row, which the analyzer connects as a branch.
fn generate_detections(rng: &mut ThreadRng, cli: &Cli) -> DetectionData {
    let mut data = DetectionData::default();

    for step in 0..cli.steps {
        let y = 60.0 + step as f64 * ROW_HEIGHT;
        let (kind, text) = if step == 0 {
            (NodeKind::Start, "Начало".to_string())
        } else if step + 1 == cli.steps {
            (NodeKind::End, "Конец".to_string())
        } else if rng.random_bool(cli.branch_chance) {
            (NodeKind::Decision, pick(rng, CONDITIONS))
        } else if rng.random_bool(0.2) {
            (NodeKind::Data, pick(rng, INPUTS))
        } else {
            (NodeKind::Process, pick(rng, ACTIONS))
        };

        push_element(rng, &mut data, cli.jitter, COLUMN_X, y, kind, text);
        if kind == NodeKind::Decision {
            let text = pick(rng, ACTIONS);
            push_element(
                rng,
                &mut data,
                cli.jitter,
                COLUMN_X + BRANCH_OFFSET,
                y,
                NodeKind::Process,
                text,
            );
        }
    }

    println!("-> Generated {} bounding boxes.", data.boxes.len());
    data
}

fn push_element(
    rng: &mut ThreadRng,
    data: &mut DetectionData,
    jitter: f64,
    cx: f64,
    cy: f64,
    kind: NodeKind,
    text: String,
) {
    let cx = cx + offset(rng, jitter);
    let cy = cy + offset(rng, jitter);
    let confidence = rng.random_range(0.6..0.99);
    let bbox = BoundingBox::new(
        cx - BOX_WIDTH / 2.0,
        cy - BOX_HEIGHT / 2.0,
        cx + BOX_WIDTH / 2.0,
        cy + BOX_HEIGHT / 2.0,
        confidence,
        kind,
    );

    let index = data.boxes.len();
    data.boxes.push(bbox);
    data.texts.insert(
        index,
        RecognizedText::Detailed(OcrResult {
            text,
            confidence: rng.random_range(0.7..0.99),
            bbox: Some([bbox.x1, bbox.y1, bbox.x2, bbox.y2]),
        }),
    );
}

fn offset(rng: &mut ThreadRng, jitter: f64) -> f64 {
    if jitter > 0.0 {
        rng.random_range(-jitter..jitter)
    } else {
        0.0
    }
}

fn pick(rng: &mut ThreadRng, options: &[&str]) -> String {
    options[rng.random_range(0..options.len())].to_string()
}
