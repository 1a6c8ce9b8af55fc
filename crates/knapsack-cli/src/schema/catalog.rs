use knapsack_ga::item::Item;

/// The twelve boxes packed when no item file is given.
const DEFAULT_ITEMS: [Item; 12] = [
    Item::new(20.0, 6.0),
    Item::new(30.0, 5.0),
    Item::new(60.0, 8.0),
    Item::new(90.0, 7.0),
    Item::new(50.0, 6.0),
    Item::new(70.0, 9.0),
    Item::new(30.0, 4.0),
    Item::new(30.0, 5.0),
    Item::new(70.0, 4.0),
    Item::new(20.0, 9.0),
    Item::new(20.0, 2.0),
    Item::new(60.0, 1.0),
];

pub fn default_items() -> Vec<Item> {
    DEFAULT_ITEMS.to_vec()
}
