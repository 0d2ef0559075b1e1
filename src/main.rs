use std::io::{self, BufRead, Write};
use std::sync::Arc;

use exam_prep_engine::{
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{ChapterInfo, SessionState},
    repositories::{
        AttemptResultRepository, InMemoryAttemptResultRepository, MongoAttemptResultRepository,
    },
    services::{AdaptiveLevelEngine, QuizAttemptService, StaticQuestionBank},
};

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.validate()?;

    let bank = StaticQuestionBank::load_json(&config.question_bank_path)?
        .shuffled(&mut rand::thread_rng());
    let engine = AdaptiveLevelEngine::new(Arc::new(bank));

    let repository = result_sink(&config).await?;
    let service = QuizAttemptService::new(repository);

    let mut session = engine.create_session();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Chapter: {}", engine.chapter_id());
    while let SessionState::InLevel {
        level,
        question_index,
    } = session.state()
    {
        let question = engine.current_question(&session)?;
        println!();
        println!("Level {} - question {}", level, question_index + 1);
        println!("{}", question.prompt);
        for (key, text) in &question.options {
            println!("  {}) {}", key, text);
        }

        let selected = prompt(&mut lines, "Your answer: ")?;
        let feedback = engine.submit_answer(&mut session, selected.trim())?;
        if feedback.is_correct {
            println!("Correct!");
        } else {
            println!("Wrong. The correct answer was {}.", feedback.correct_option);
        }
        if !feedback.explanation.is_empty() {
            println!("{}", feedback.explanation);
        }

        prompt(&mut lines, "Press Enter to continue...")?;
        engine.continue_after_explanation(&mut session)?;
    }

    let result = engine.get_result(&session)?;
    println!();
    println!("{}", result.message);
    println!(
        "Correct answers: {}/{} in {} minute(s)",
        result.total_correct, result.total_questions, result.elapsed_minutes
    );

    let record = service.record_result(&config.learner_id, result).await?;
    let chapter = ChapterInfo {
        chapter_id: record.chapter_id.clone(),
        title: record.chapter_id.clone(),
        estimated_minutes: 0,
    };
    let summary = service.chapter_summary(&config.learner_id, &chapter).await?;
    println!(
        "Attempt #{} recorded. Chapter status: {:?}, best levels cleared: {}",
        record.attempt_number, summary.status, summary.levels_cleared
    );

    Ok(())
}

async fn result_sink(config: &Config) -> AppResult<Arc<dyn AttemptResultRepository>> {
    if !config.persist_results {
        log::info!("PERSIST_RESULTS is off, keeping attempt results in memory");
        return Ok(Arc::new(InMemoryAttemptResultRepository::new()));
    }

    let db = Database::connect(config).await?;
    let repository = MongoAttemptResultRepository::new(&db, &config.attempt_results_collection);
    repository.ensure_indexes().await?;
    Ok(Arc::new(repository))
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> AppResult<String> {
    print!("{}", message);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(AppError::InternalError(
            "input closed before the attempt finished".to_string(),
        )),
    }
}
