//! Default column catalog
//!
//! Fixed primary and secondary column lists used when no persisted state
//! exists. Labels are the product's display strings; a `*` prefix marks
//! fields synchronized with the upstream catalog.

use crate::column::Column;
use once_cell::sync::Lazy;

static DEFAULT_PRIMARY: Lazy<Vec<Column>> = Lazy::new(|| {
    vec![
        Column::builtin("plan7_id", "* ID на Plan7", true),
        Column::builtin("room_type", "Тип помещения", true),
        Column::builtin("status_buyer", "* Статус для покупателей", true),
        Column::builtin("finish_quality", "Качество отделки (Авито)", true),
        Column::builtin("avito_type", "Авито.Коммерция. Вид объекта", true),
        Column::builtin("avito_entrance", "Авито.Коммерция. Вход", true),
        Column::builtin("avito_planning", "Авито.Коммерция. Планировка", true),
        Column::builtin("dev_id", "* ID у застройщика", false),
        Column::builtin("building", "Здание", false),
        Column::builtin("room_num", "Номер помещения", false),
        Column::builtin("area", "Площадь", true),
        Column::builtin("price_m2", "Цена за м.кв", true),
        Column::builtin("total_price", "Стоимость", false),
    ]
});

static DEFAULT_SECONDARY: Lazy<Vec<Column>> = Lazy::new(|| {
    vec![
        Column::builtin("tags", "Теги", false),
        Column::builtin("link", "Ссылка", false),
        Column::builtin("class", "Класс жилья", false),
    ]
});

/// Default primary (built-in) columns
pub fn default_primary() -> Vec<Column> {
    DEFAULT_PRIMARY.clone()
}

/// Default secondary (built-in) columns
pub fn default_secondary() -> Vec<Column> {
    DEFAULT_SECONDARY.clone()
}
