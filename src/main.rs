//! Leveraged Trading Simulation.
//!
//! Walks the engine through the full player lifecycle: registration, opening
//! leveraged positions, automatic take-profit/stop-loss settlement, manual
//! closes, and balance wipeouts.

use levtrade_core::*;

const ADMIN: AccountId = AccountId(1);
const ALICE: AccountId = AccountId(100);
const BOB: AccountId = AccountId(101);

fn main() {
    println!("Leveraged Trading Simulation Engine");
    println!("Single Position Per Player, Pushed Prices, Fixed-Point Settlement\n");

    scenario_1_registration();
    scenario_2_long_round_trip();
    scenario_3_short_round_trip();
    scenario_4_manual_close();
    scenario_5_wipeout();

    println!("\nAll simulations completed successfully.");
}

fn new_engine() -> Engine {
    let mut engine = Engine::new(EngineConfig::default(), ADMIN);
    engine.set_time(Timestamp::now());
    engine
}

/// Registration hands out the fixed stake exactly once.
fn scenario_1_registration() {
    println!("Scenario 1: Registration\n");

    let mut engine = new_engine();

    engine.register(ALICE).unwrap();
    println!("  Alice registers, balance: {}", engine.balance(ALICE));

    let second = engine.register(ALICE);
    println!("  Alice registers again: {}", second.unwrap_err());
    println!("  Balance unchanged: {}\n", engine.balance(ALICE));
}

/// A long position riding up to take-profit, then one stopped out.
fn scenario_2_long_round_trip() {
    println!("Scenario 2: Long Positions\n");

    let mut engine = new_engine();
    engine.register(ALICE).unwrap();

    let trade_id = engine
        .open_trade(
            ALICE,
            Side::Long,
            Quote::from_units(1000),
            10,
            Price::from_units(100),
            Price::from_units(120),
            Price::from_units(90),
        )
        .unwrap();
    println!("  Alice opens long #{} @ 100, TP 120 / SL 90, 1000 margin, 10x", trade_id.0);

    // prices inside the window change nothing
    assert!(engine.resolve(ADMIN, ALICE, Price::from_units(110)).unwrap().is_none());
    println!("  Price 110: no trigger, trade stays open");

    let settlement = engine
        .resolve(ADMIN, ALICE, Price::from_units(125))
        .unwrap()
        .unwrap();
    println!(
        "  Price 125: {} at {}, pnl {}, balance {}",
        settlement.reason, settlement.exit_price, settlement.pnl, settlement.new_balance
    );

    engine
        .open_trade(
            ALICE,
            Side::Long,
            Quote::from_units(1000),
            10,
            Price::from_units(100),
            Price::from_units(120),
            Price::from_units(90),
        )
        .unwrap();
    let settlement = engine
        .resolve(ADMIN, ALICE, Price::from_units(88))
        .unwrap()
        .unwrap();
    println!(
        "  Fresh long, price 88: {} at {}, pnl {}, balance {}\n",
        settlement.reason, settlement.exit_price, settlement.pnl, settlement.new_balance
    );
}

/// Shorts profit on the way down and stop out on the way up.
fn scenario_3_short_round_trip() {
    println!("Scenario 3: Short Positions\n");

    let mut engine = new_engine();
    engine.register(BOB).unwrap();

    engine
        .open_trade(
            BOB,
            Side::Short,
            Quote::from_units(1000),
            10,
            Price::from_units(100),
            Price::from_units(80),
            Price::from_units(110),
        )
        .unwrap();
    let settlement = engine
        .resolve(ADMIN, BOB, Price::from_units(75))
        .unwrap()
        .unwrap();
    println!(
        "  Short @ 100, price 75: {} at {}, pnl {}, balance {}",
        settlement.reason, settlement.exit_price, settlement.pnl, settlement.new_balance
    );

    engine
        .open_trade(
            BOB,
            Side::Short,
            Quote::from_units(1000),
            10,
            Price::from_units(100),
            Price::from_units(80),
            Price::from_units(110),
        )
        .unwrap();
    let settlement = engine
        .resolve(ADMIN, BOB, Price::from_units(112))
        .unwrap()
        .unwrap();
    println!(
        "  Short @ 100, price 112: {} at {}, pnl {}, balance {}\n",
        settlement.reason, settlement.exit_price, settlement.pnl, settlement.new_balance
    );
}

/// A pending manual close beats a stop-loss hit on the same update.
fn scenario_4_manual_close() {
    println!("Scenario 4: Manual Close Override\n");

    let mut engine = new_engine();
    engine.register(ALICE).unwrap();

    engine
        .open_trade(
            ALICE,
            Side::Long,
            Quote::from_units(500),
            20,
            Price::from_units(100),
            Price::from_units(120),
            Price::from_units(90),
        )
        .unwrap();
    engine.close_trade(ALICE).unwrap();
    println!("  Alice requests manual close; trade remains open");

    // 85 would stop out at 90, but the manual request settles at 85 itself
    let settlement = engine
        .resolve(ADMIN, ALICE, Price::from_units(85))
        .unwrap()
        .unwrap();
    println!(
        "  Price 85: {} at {}, pnl {}, balance {}\n",
        settlement.reason, settlement.exit_price, settlement.pnl, settlement.new_balance
    );
}

/// Losses clamp at zero, and a zeroed account may register again.
fn scenario_5_wipeout() {
    println!("Scenario 5: Wipeout and Re-registration\n");

    let mut engine = new_engine();
    engine.register(BOB).unwrap();

    engine
        .open_trade(
            BOB,
            Side::Long,
            Quote::from_units(10_000),
            500,
            Price::from_units(100),
            Price::from_units(200),
            Price::from_units(95),
        )
        .unwrap();
    println!("  Bob stakes his whole balance at 500x");

    let settlement = engine
        .resolve(ADMIN, BOB, Price::from_units(40))
        .unwrap()
        .unwrap();
    println!(
        "  Price 40: {} at {}, pnl {}, balance clamped to {}",
        settlement.reason, settlement.exit_price, settlement.pnl, settlement.new_balance
    );

    // a zero balance is indistinguishable from never having registered
    engine.register(BOB).unwrap();
    println!("  Bob registers again, balance: {}", engine.balance(BOB));
}
