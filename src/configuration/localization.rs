/*!
# Localization

Russian display names of configuration folders and the ordering used
for object lists. Objects are sorted the way a Russian-locale user
expects: case-insensitive, with `ё` collated as `е`.
*/

use std::cmp::Ordering;

/// Localized (Russian) name of an object-type folder.
/// Unknown folder names are returned unchanged.
pub fn localized_folder_name(folder: &str) -> &str {
    match folder {
        "Catalogs" => "Справочники",
        "Documents" => "Документы",
        "Reports" => "Отчеты",
        "DataProcessors" => "Обработки",
        "AccumulationRegisters" => "Регистры накопления",
        "InformationRegisters" => "Регистры сведений",
        "ChartsOfCharacteristicTypes" => "Планы видов характеристик",
        "CommonModules" => "Общие модули",
        "CommonForms" => "Общие формы",
        "CommonCommands" => "Общие команды",
        "Constants" => "Константы",
        "Enums" => "Перечисления",
        "Roles" => "Роли",
        "Subsystems" => "Подсистемы",
        "ExchangePlans" => "Планы обмена",
        "ScheduledJobs" => "Регламентные задания",
        "FunctionalOptions" => "Функциональные опции",
        "HTTPServices" => "HTTP сервисы",
        "WebServices" => "Web сервисы",
        other => other,
    }
}

/// Primary collation key: lower case, `ё` folded into `е`
fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}

/// Locale-aware comparison of display names.
///
/// Primary order ignores case and treats `ё` as `е`. Ties go to `е`
/// before `ё`, then to lowercase before uppercase, then to the raw value,
/// so the result is total and does not depend on input order.
pub fn compare_display_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_folders_are_translated() {
        assert_eq!(localized_folder_name("Catalogs"), "Справочники");
        assert_eq!(localized_folder_name("HTTPServices"), "HTTP сервисы");
    }

    #[test]
    fn test_unknown_folder_is_kept() {
        assert_eq!(localized_folder_name("UnknownType"), "UnknownType");
    }

    #[test]
    fn test_case_insensitive_order() {
        let mut names = vec!["бета", "Альфа", "альфа", "Гамма", "ёж", "Еда", "еж"];
        names.sort_by(|a, b| compare_display_names(a, b));
        assert_eq!(names, vec!["альфа", "Альфа", "бета", "Гамма", "Еда", "еж", "ёж"]);
    }

    #[test]
    fn test_latin_before_cyrillic() {
        assert_eq!(compare_display_names("Zeta", "Альфа"), Ordering::Less);
        assert_eq!(compare_display_names("apple", "Banana"), Ordering::Less);
    }
}
