use crate::api::server as api_server;
use crate::cli::opts::*;
use crate::lexicon::{read_lexicon, write_lexicon};
use crate::settings::EngineSettings;

use anyhow::{bail, Context, Result};
use lexicard_core::{
    apply_judgment,
    filters::{filter_by_text, filter_needs_correction, filter_with_audio},
    BucketEngine, Card, CoreError, Deck, Judgment, Repository, SessionScore, Transition,
};
use lexicard_json::deck_file::{check_unique_ids, load_deck_file, save_deck_file};
use lexicard_json::JsonStore;
use rand::seq::SliceRandom;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub async fn run_cli(args: Cli) -> Result<()> {
    let repo = open_repo(args.data_dir.as_deref()).await?;
    let settings = args.engine_settings();
    match args.cmd {
        Command::Api(api) => {
            let addr: std::net::SocketAddr = api.addr.parse()?;
            api_server::run(repo, settings, addr).await
        }
        Command::Deck(cmd) => deck_cmd(repo, cmd).await,
        Command::Card(cmd) => card_cmd(repo, cmd).await,
        Command::Practice(cmd) => practice_cmd(repo, &settings, cmd).await,
        Command::Quiz(cmd) => quiz_cmd(&*repo, &settings, cmd).await,
        Command::Tui => bail!("the TUI runs on its own runtime; start it from main"),
    }
}

pub async fn open_repo(data_dir: Option<&Path>) -> Result<Arc<dyn Repository>> {
    let store = match data_dir {
        Some(dir) => JsonStore::open_in(dir).await?,
        None => JsonStore::open_default().await?,
    };
    info!(path = %store.path().display(), "using json store");
    Ok(Arc::new(store))
}

async fn deck_cmd(repo: Arc<dyn Repository>, cmd: DeckCmd) -> Result<()> {
    match cmd {
        DeckCmd::Add { name, lang, author, description } => {
            let mut d = repo.create_deck(&name, &lang).await?;
            if author.is_some() || description.is_some() {
                d.author = author.unwrap_or_default();
                d.description = description.unwrap_or_default();
                repo.save_deck(&d).await?;
            }
            println!("{}", d.name);
        }
        DeckCmd::List => {
            let mut v = repo.list_decks().await?;
            v.sort_by(|a, b| a.name.cmp(&b.name));
            for d in v {
                println!("{}\t{}\t{} cards\t{}", d.name, d.target_language, d.cards.len(), d.author);
            }
        }
        DeckCmd::Show(s) => {
            let deck = repo.get_deck(&s.deck).await?;
            let mut cards = deck.cards.clone();
            if let Some(q) = &s.query { cards = filter_by_text(&cards, q); }
            if s.flagged { cards = filter_needs_correction(&cards); }
            if s.audio { cards = filter_with_audio(&cards); }
            println!("{} ({}) by {}: {}", deck.name, deck.target_language, deck.author, deck.description);
            for c in cards {
                let sound = c.sound.as_deref().unwrap_or("-");
                let flag = if c.check_for_correction { "\t[check]" } else { "" };
                println!("{}\t{}\t{}\t{}\tsound={}{}", c.id, c.target_word, c.phonetic, c.explain, sound, flag);
            }
        }
        DeckCmd::Rm { deck } => {
            repo.delete_deck(&deck).await?;
            println!("ok");
        }
        DeckCmd::Import { path, replace } => {
            let deck = load_deck_file(&path)?;
            store_imported(&*repo, deck, replace).await?;
        }
        DeckCmd::Export { deck, path } => {
            let d = repo.get_deck(&deck).await?;
            save_deck_file(&d, &path)?;
            println!("wrote {}", path.display());
        }
        DeckCmd::ImportCsv(c) => {
            let file = std::fs::File::open(&c.path)
                .with_context(|| format!("opening {}", c.path.display()))?;
            let mut deck = Deck::new(c.name, c.lang);
            deck.author = c.author.unwrap_or_default();
            deck.cards = read_lexicon(file)?;
            deck.last_id_used = deck.cards.iter().map(|c| c.id).max().unwrap_or(0);
            check_unique_ids(&deck)?;
            store_imported(&*repo, deck, c.replace).await?;
        }
        DeckCmd::ExportCsv { deck, path } => {
            let d = repo.get_deck(&deck).await?;
            let file = std::fs::File::create(&path)?;
            write_lexicon(file, &d.cards)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

async fn store_imported<R: Repository + ?Sized>(repo: &R, deck: Deck, replace: bool) -> Result<()> {
    match repo.get_deck(&deck.name).await {
        Ok(_) if !replace => bail!("deck {} already exists (use --replace)", deck.name),
        Ok(_) | Err(CoreError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }
    repo.save_deck(&deck).await?;
    println!("imported {} ({} cards)", deck.name, deck.cards.len());
    Ok(())
}

async fn card_cmd(repo: Arc<dyn Repository>, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let c = repo
                .add_card(&a.deck, &a.word, &a.phonetic, &a.explain, a.sound.as_deref())
                .await?;
            println!("{}", c.id);
        }
        CardCmd::Flag { deck, card_id, clear } => {
            repo.set_correction_flag(&deck, card_id, !clear).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn practice_cmd(repo: Arc<dyn Repository>, settings: &EngineSettings, cmd: PracticeCmd) -> Result<()> {
    let (mut engine, origins) = settings.build_from_decks(&*repo, &cmd.decks).await?;
    let mut score = SessionScore::default();

    let mut card = match engine.get_current_card() {
        Ok(c) => c,
        Err(CoreError::EmptyPool) => {
            println!("no cards to practice");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for n in 1..=cmd.max {
        println!("\n[{}/{}] {}", n, cmd.max, engine.sizes());
        show_question(&card);
        println!("[enter=reveal, y=correct, n=wrong, s=skip, f=flag typo, q=quit]");

        let mut revealed = false;
        let judgment = loop {
            let line = read_line("> ")?;
            match line.trim().to_lowercase().as_str() {
                "" => {
                    if !revealed {
                        println!("A: {}", card.explain);
                        revealed = true;
                    }
                }
                "q" | "quit" => return finish(&engine, &score),
                "f" | "flag" => {
                    match origins.deck_of(card.id) {
                        Some(deck) => {
                            repo.set_correction_flag(deck, card.id, true).await?;
                            println!("flagged for correction in {deck}");
                        }
                        None => println!("card is no longer in this session"),
                    }
                }
                other => match Judgment::parse(other) {
                    Some(Judgment::Correct { .. }) => break Judgment::Correct { confident: !revealed },
                    Some(j) => break j,
                    None => println!("enter, y, n, s, f or q"),
                },
            }
        };

        if judgment == Judgment::Incorrect && !revealed {
            println!("A: {}", card.explain);
        }
        score.record(&judgment);
        if let Some(Transition::Moved { to, .. }) = apply_judgment(&mut engine, card.id, judgment) {
            println!("→ {:?}", to);
        }
        card = engine.pick_next()?;
    }
    finish(&engine, &score)
}

async fn quiz_cmd<R: Repository + ?Sized>(repo: &R, settings: &EngineSettings, cmd: PracticeCmd) -> Result<()> {
    let (mut engine, _) = settings.build_from_decks(repo, &cmd.decks).await?;
    let mut score = SessionScore::default();
    let mut rng = rand::thread_rng();

    for n in 1..=cmd.max {
        let set = match engine.pick_distractor_set() {
            Ok(s) => s,
            Err(CoreError::EmptyPool) => {
                println!("no cards to practice");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        let Some(choices) = set.choices() else {
            println!("deck too small for multiple choice (need 3 cards)");
            break;
        };
        let mut choices = choices.to_vec();
        choices.shuffle(&mut rng);

        println!("\n[{}/{}] {}", n, cmd.max, engine.sizes());
        show_question(&set.question);
        for (i, c) in choices.iter().enumerate() {
            println!("  {}) {}", i + 1, c.explain);
        }
        let picked = loop {
            let line = read_line("choice (1-3, q=quit)> ")?;
            match line.trim() {
                "q" => return finish(&engine, &score),
                s => match s.parse::<usize>() {
                    Ok(i) if (1..=3).contains(&i) => break choices[i - 1],
                    _ => println!("enter 1, 2, 3 or q"),
                },
            }
        };

        let judgment = if picked.id == set.question.id {
            println!("correct!");
            Judgment::Correct { confident: true }
        } else {
            println!("no: {}", set.question.explain);
            Judgment::Incorrect
        };
        score.record(&judgment);
        apply_judgment(&mut engine, set.question.id, judgment);
    }
    finish(&engine, &score)
}

// ===== Helpers =====
fn show_question(card: &Card) {
    println!("Q: {}", card.target_word);
    if !card.phonetic.is_empty() { println!("   {}", card.phonetic); }
    if let Some(s) = &card.sound { println!("   (audio: {s})"); }
}

fn finish(engine: &BucketEngine, score: &SessionScore) -> Result<()> {
    println!(
        "\nscore {} ({} correct, {} wrong, {} skipped) | {}",
        score.tally, score.correct, score.incorrect, score.skipped, engine.sizes()
    );
    Ok(())
}

fn read_line(prompt: &str) -> Result<String> { print!("{prompt}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(s) }
