/*!
# Object-Type Catalog

Static table of the metadata object kinds the viewer understands.
Each entry ties a configuration folder (`Catalogs`) to the XML tag of
its objects (`Catalog`) and to the icons used by the tree.
*/

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kinds of 1C metadata objects found in configuration dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    Catalog,                    // Справочник
    Document,                   // Документ
    Report,                     // Отчет
    DataProcessor,              // Обработка
    AccumulationRegister,       // РегистрНакопления
    InformationRegister,        // РегистрСведений
    ChartOfCharacteristicTypes, // ПланВидовХарактеристик
    CommonModule,               // ОбщийМодуль
    CommonForm,                 // ОбщаяФорма
    CommonCommand,              // ОбщаяКоманда
    Constant,                   // Константа
    Enum,                       // Перечисление
    Role,                       // Роль
    Subsystem,                  // Подсистема
    ExchangePlan,               // ПланОбмена
    ScheduledJob,               // РегламентноеЗадание
    FunctionalOption,           // ФункциональнаяОпция
    HTTPService,                // HTTPСервис
    WebService,                 // WebСервис
}

/// One row of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectTypeInfo {
    /// Folder name inside a configuration dump
    pub folder: &'static str,
    pub kind: ObjectKind,
    /// Icon of the folder entry in the original type table
    pub folder_icon: &'static str,
}

/// All known object types, in display order
pub static OBJECT_TYPES: [ObjectTypeInfo; 19] = [
    ObjectTypeInfo { folder: "Catalogs", kind: ObjectKind::Catalog, folder_icon: "symbol-class" },
    ObjectTypeInfo { folder: "Documents", kind: ObjectKind::Document, folder_icon: "symbol-file" },
    ObjectTypeInfo { folder: "Reports", kind: ObjectKind::Report, folder_icon: "symbol-method" },
    ObjectTypeInfo { folder: "DataProcessors", kind: ObjectKind::DataProcessor, folder_icon: "symbol-function" },
    ObjectTypeInfo { folder: "AccumulationRegisters", kind: ObjectKind::AccumulationRegister, folder_icon: "symbol-array" },
    ObjectTypeInfo { folder: "InformationRegisters", kind: ObjectKind::InformationRegister, folder_icon: "symbol-interface" },
    ObjectTypeInfo { folder: "ChartsOfCharacteristicTypes", kind: ObjectKind::ChartOfCharacteristicTypes, folder_icon: "symbol-enum" },
    ObjectTypeInfo { folder: "CommonModules", kind: ObjectKind::CommonModule, folder_icon: "symbol-module" },
    ObjectTypeInfo { folder: "CommonForms", kind: ObjectKind::CommonForm, folder_icon: "symbol-structure" },
    ObjectTypeInfo { folder: "CommonCommands", kind: ObjectKind::CommonCommand, folder_icon: "symbol-event" },
    ObjectTypeInfo { folder: "Constants", kind: ObjectKind::Constant, folder_icon: "symbol-constant" },
    ObjectTypeInfo { folder: "Enums", kind: ObjectKind::Enum, folder_icon: "symbol-enum-member" },
    ObjectTypeInfo { folder: "Roles", kind: ObjectKind::Role, folder_icon: "symbol-key" },
    ObjectTypeInfo { folder: "Subsystems", kind: ObjectKind::Subsystem, folder_icon: "symbol-namespace" },
    ObjectTypeInfo { folder: "ExchangePlans", kind: ObjectKind::ExchangePlan, folder_icon: "sync" },
    ObjectTypeInfo { folder: "ScheduledJobs", kind: ObjectKind::ScheduledJob, folder_icon: "clock" },
    ObjectTypeInfo { folder: "FunctionalOptions", kind: ObjectKind::FunctionalOption, folder_icon: "settings-gear" },
    ObjectTypeInfo { folder: "HTTPServices", kind: ObjectKind::HTTPService, folder_icon: "globe" },
    ObjectTypeInfo { folder: "WebServices", kind: ObjectKind::WebService, folder_icon: "cloud" },
];

static BY_FOLDER: Lazy<HashMap<&'static str, &'static ObjectTypeInfo>> =
    Lazy::new(|| OBJECT_TYPES.iter().map(|info| (info.folder, info)).collect());

static BY_TAG: Lazy<HashMap<&'static str, ObjectKind>> =
    Lazy::new(|| OBJECT_TYPES.iter().map(|info| (info.kind.tag_name(), info.kind)).collect());

/// Iterates over the catalog in display order
pub fn object_types() -> impl Iterator<Item = &'static ObjectTypeInfo> {
    OBJECT_TYPES.iter()
}

/// Looks up a catalog entry by its folder name
pub fn by_folder(folder: &str) -> Option<&'static ObjectTypeInfo> {
    BY_FOLDER.get(folder).copied()
}

/// Returns `true` if `name` is one of the known object-type folders
pub fn is_object_folder(name: &str) -> bool {
    BY_FOLDER.contains_key(name)
}

impl ObjectKind {
    /// XML element name of the object inside `MetaDataObject`
    pub fn tag_name(&self) -> &'static str {
        match self {
            ObjectKind::Catalog => "Catalog",
            ObjectKind::Document => "Document",
            ObjectKind::Report => "Report",
            ObjectKind::DataProcessor => "DataProcessor",
            ObjectKind::AccumulationRegister => "AccumulationRegister",
            ObjectKind::InformationRegister => "InformationRegister",
            ObjectKind::ChartOfCharacteristicTypes => "ChartOfCharacteristicTypes",
            ObjectKind::CommonModule => "CommonModule",
            ObjectKind::CommonForm => "CommonForm",
            ObjectKind::CommonCommand => "CommonCommand",
            ObjectKind::Constant => "Constant",
            ObjectKind::Enum => "Enum",
            ObjectKind::Role => "Role",
            ObjectKind::Subsystem => "Subsystem",
            ObjectKind::ExchangePlan => "ExchangePlan",
            ObjectKind::ScheduledJob => "ScheduledJob",
            ObjectKind::FunctionalOption => "FunctionalOption",
            ObjectKind::HTTPService => "HTTPService",
            ObjectKind::WebService => "WebService",
        }
    }

    /// Parses an XML tag name back into a kind
    pub fn from_tag_name(tag: &str) -> Option<Self> {
        BY_TAG.get(tag).copied()
    }

    /// Icon of an object of this kind in the tree
    pub fn item_icon(&self) -> &'static str {
        match self {
            ObjectKind::Catalog => "symbol-class",
            ObjectKind::Document => "symbol-file",
            ObjectKind::Report => "graph",
            ObjectKind::DataProcessor => "symbol-function",
            ObjectKind::AccumulationRegister => "symbol-array",
            ObjectKind::InformationRegister => "table",
            ObjectKind::ChartOfCharacteristicTypes => "symbol-enum",
            ObjectKind::CommonModule => "symbol-module",
            ObjectKind::CommonForm => "symbol-structure",
            ObjectKind::CommonCommand => "symbol-event",
            ObjectKind::Constant => "symbol-constant",
            ObjectKind::Enum => "symbol-enum-member",
            ObjectKind::Role => "key",
            ObjectKind::Subsystem => "symbol-namespace",
            ObjectKind::ExchangePlan => "sync",
            ObjectKind::ScheduledJob => "clock",
            ObjectKind::FunctionalOption => "settings-gear",
            ObjectKind::HTTPService => "globe",
            ObjectKind::WebService => "cloud",
        }
    }

    /// CSS class of the details page header icon
    pub fn css_icon_class(&self) -> &'static str {
        match self {
            ObjectKind::Catalog => "icon-catalog",
            ObjectKind::Document => "icon-document",
            ObjectKind::Report => "icon-report",
            ObjectKind::DataProcessor => "icon-dataprocessor",
            ObjectKind::AccumulationRegister => "icon-accumulation-register",
            ObjectKind::InformationRegister => "icon-information-register",
            ObjectKind::CommonModule => "icon-common-module",
            ObjectKind::CommonForm => "icon-common-form",
            ObjectKind::Constant => "icon-constant",
            ObjectKind::Enum => "icon-enum",
            _ => "icon-default",
        }
    }

    /// Catalog entry of this kind
    pub fn info(&self) -> &'static ObjectTypeInfo {
        // каждая вариация перечисления присутствует в OBJECT_TYPES
        let index = OBJECT_TYPES
            .iter()
            .position(|info| info.kind == *self)
            .unwrap_or(0);
        &OBJECT_TYPES[index]
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_are_consistent() {
        assert_eq!(object_types().count(), 19);
        for info in object_types() {
            assert!(!info.folder.is_empty());
            assert!(!info.folder_icon.is_empty());
            assert_eq!(by_folder(info.folder), Some(info));
            assert_eq!(ObjectKind::from_tag_name(info.kind.tag_name()), Some(info.kind));
            assert_eq!(info.kind.info().folder, info.folder);
        }
    }

    #[test]
    fn test_lookup_by_folder() {
        assert_eq!(by_folder("Catalogs").map(|i| i.kind), Some(ObjectKind::Catalog));
        assert_eq!(by_folder("WebServices").map(|i| i.kind), Some(ObjectKind::WebService));
        assert!(by_folder("Forms").is_none());
        assert!(is_object_folder("Documents"));
        assert!(!is_object_folder("documents"));
    }

    #[test]
    fn test_icons() {
        assert_eq!(ObjectKind::Report.item_icon(), "graph");
        assert_eq!(ObjectKind::Role.item_icon(), "key");
        assert_eq!(ObjectKind::Catalog.css_icon_class(), "icon-catalog");
        assert_eq!(ObjectKind::WebService.css_icon_class(), "icon-default");
    }
}
