use chrono::Utc;
use stillmind_core::wellness;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let tip = wellness::daily_tip(Utc::now().date_naive());
    println!("{}", tip.tip);
    println!("{}", tip.activity);
    println!("focus: {}", tip.focus);
    Ok(())
}
