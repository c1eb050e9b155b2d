use blackjack_sim_drivers::{ConfigBlackjackSimulator, Statistics};

pub fn print_report(simulator_config: &ConfigBlackjackSimulator, statistics: &Statistics) {
    let (won, pushed, lost) = statistics.get_hands();

    println!("Results for {:?}:", simulator_config.player_strategy);
    println!(
        "Running for {} runs, strategy wins ${}",
        statistics.get_rounds(),
        statistics.get_current_money()
    );
    println!(
        "Money put in: {} ({} including doubles and splits)",
        statistics.get_total_bet(),
        statistics.get_total_wagered()
    );
    println!("Hands won: {}. Pushed: {}. Lost: {}.", won, pushed, lost);
    println!(
        "On average, this strategy gains {} per round",
        statistics.get_average()
    );
    println!("Rate per unit wagered: {:.2}%", statistics.get_rate() * 100.0);
    println!("{}", statistics.describe_edge(simulator_config.bet));
}
