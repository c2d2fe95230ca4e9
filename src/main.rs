mod stemmer;
mod stem_cache;
mod tag_analyzer;
mod web_server;

use std::env;
use std::fs;
use std::sync::Arc;
use stem_cache::StemCache;
use stemmer::Stemmer;
use tag_analyzer::TagAnalyzer;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    // Перевіряємо аргументи командного рядка
    if args.len() > 1 && args[1] == "web" {
        start_web_mode().await;
    } else {
        start_cli_mode(&args);
    }
}

async fn start_web_mode() {
    println!("🏷️  Heuristic Tagger - Web Mode");
    println!("================================");

    let stem_cache = Arc::new(StemCache::new());

    // Запуск веб-сервера зі спільним кешем основ
    if let Err(e) = web_server::start_web_server(stem_cache).await {
        eprintln!("❌ Помилка запуску сервера: {}", e);
    }
}

fn start_cli_mode(args: &[String]) {
    println!("🏷️  Heuristic Tagger - CLI Mode");
    println!("================================");

    let tags_path = args.get(1).map(String::as_str).unwrap_or("tags.txt");
    let text_path = args.get(2).map(String::as_str).unwrap_or("text.txt");

    if let Err(e) = analyze_files(tags_path, text_path) {
        println!("❌ {}", e);
        println!("💡 Використання: heuristic_TAGGER [файл_тегів] [файл_тексту]");
        println!("💡 або: heuristic_TAGGER web");
    }
}

fn analyze_files(tags_path: &str, text_path: &str) -> Result<(), String> {
    println!("📄 Файл тегів: {}", tags_path);
    println!("📄 Файл тексту: {}", text_path);

    let tags = load_tags(tags_path)?;
    let text = fs::read_to_string(text_path)
        .map_err(|e| format!("Помилка читання файлу тексту {}: {}", text_path, e))?;

    println!("🔍 Аналіз {} тегів...", tags.len());
    let start_time = std::time::Instant::now();

    let stem_cache = Arc::new(StemCache::new());
    let analyzer = TagAnalyzer::new(&tags, &text, Stemmer::with_cache(Arc::clone(&stem_cache)));

    let matched_indices = analyzer
        .analyze()
        .ok_or_else(|| "Порожній список тегів або порожній текст".to_string())?;

    let processing_time = start_time.elapsed().as_millis();

    if matched_indices.is_empty() {
        println!("ℹ️  Жодного тега не знайдено в тексті");
    } else {
        println!("✅ Знайдено {} тегів:", matched_indices.len());
        for key in &matched_indices {
            println!("   [{}] {}", key, tags[*key]);
        }
    }

    println!("📊 Статистика:");
    println!("   - Тегів перевірено: {}", tags.len());
    println!("   - Слів у кеші основ: {}", stem_cache.len());
    println!("   - Час обробки: {} мс", processing_time);

    Ok(())
}

// Читає теги з файлу, по одному на рядок, порожні рядки пропускаються
fn load_tags(tags_path: &str) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(tags_path)
        .map_err(|e| format!("Помилка читання файлу тегів {}: {}", tags_path, e))?;

    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}
