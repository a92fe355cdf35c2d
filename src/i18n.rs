use std::collections::HashMap;

pub struct I18n {
    translations: HashMap<String, HashMap<String, String>>,
    current_lang: String,
}

impl I18n {
    pub fn new(lang: &str) -> Self {
        let mut translations = HashMap::new();

        // 英文
        let mut en = HashMap::new();
        // Help texts
        en.insert("help_about".to_string(), "Game character name translator (CN -> EN / KR)".to_string());
        en.insert("help_lookup".to_string(), "Look up a name once and print both translations".to_string());
        en.insert("help_lookup_arg".to_string(), "Character name in Chinese (canonical name or alias)".to_string());
        en.insert("help_info".to_string(), "Show the record behind a name (country, HID, known names)".to_string());
        en.insert("help_countries".to_string(), "List country tables found in the database directory".to_string());
        en.insert("help_watch".to_string(), "Translate interactively as you type".to_string());
        en.insert("help_label_usage".to_string(), "Usage:".to_string());
        en.insert("help_label_commands".to_string(), "Commands:".to_string());
        en.insert("help_label_options".to_string(), "Options:".to_string());
        en.insert("help_label_arguments".to_string(), "Arguments:".to_string());
        // Config help
        en.insert("help_config_section".to_string(), "Config (~/.nt/config.toml):".to_string());
        en.insert("help_config_dir".to_string(), "database.dir: directory holding the JSON tables (env NT_DATA_DIR overrides)".to_string());
        en.insert("help_config_language".to_string(), "display.language: auto | en | zh (auto follows LANG)".to_string());
        en.insert("help_config_alt_screen".to_string(), "display.alt_screen: true | false (alternate screen in watch mode; env NT_ALT_SCREEN overrides)".to_string());

        // Runtime messages
        en.insert("track_en".to_string(), "CN -> EN".to_string());
        en.insert("track_kr".to_string(), "CN -> KR".to_string());
        en.insert("no_translation".to_string(), "no translation result".to_string());
        en.insert("data_missing".to_string(), "translation data not found".to_string());
        en.insert("dict_load_error".to_string(), "failed to load {0} dictionary: {1}".to_string());
        en.insert("country_load_error".to_string(), "failed to load country table [{0}]: {1}".to_string());
        en.insert("did_you_mean".to_string(), "did you mean: {0}".to_string());

        // Watch mode
        en.insert("input_placeholder".to_string(), "Type a character name in Chinese:".to_string());
        en.insert("watch_hint".to_string(), "Esc=quit, Delete=clear, Backspace=delete".to_string());
        en.insert("warning_interactive_failed".to_string(), "Warning: cannot enable raw terminal mode, watch mode unavailable".to_string());

        // Info / countries output
        en.insert("info_country".to_string(), "Country".to_string());
        en.insert("info_hid".to_string(), "HID".to_string());
        en.insert("info_names".to_string(), "Known names".to_string());
        en.insert("info_not_found".to_string(), "no entry for {0}".to_string());
        en.insert("countries_header".to_string(), "Country tables in {0}:".to_string());
        en.insert("countries_none".to_string(), "no country tables found".to_string());
        en.insert("countries_entry".to_string(), "{0}: {1} entries".to_string());
        en.insert("countries_invalid".to_string(), "{0}: unreadable ({1})".to_string());

        // 中文
        let mut zh = HashMap::new();
        // Help texts
        zh.insert("help_about".to_string(), "游戏角色名称翻译工具（中->英 / 中->韩）".to_string());
        zh.insert("help_lookup".to_string(), "查询一次名称并输出两种翻译".to_string());
        zh.insert("help_lookup_arg".to_string(), "角色中文名称（本名或别名）".to_string());
        zh.insert("help_info".to_string(), "显示名称对应的记录（国家、HID、全部可用名称）".to_string());
        zh.insert("help_countries".to_string(), "列出数据库目录中的国家数据表".to_string());
        zh.insert("help_watch".to_string(), "输入即译的交互模式".to_string());
        zh.insert("help_label_usage".to_string(), "用法:".to_string());
        zh.insert("help_label_commands".to_string(), "命令:".to_string());
        zh.insert("help_label_options".to_string(), "选项:".to_string());
        zh.insert("help_label_arguments".to_string(), "参数:".to_string());
        // Config help
        zh.insert("help_config_section".to_string(), "配置文件 (~/.nt/config.toml):".to_string());
        zh.insert("help_config_dir".to_string(), "database.dir: 存放 JSON 数据表的目录（环境变量 NT_DATA_DIR 可覆盖）".to_string());
        zh.insert("help_config_language".to_string(), "display.language: auto | en | zh（auto 跟随 LANG）".to_string());
        zh.insert("help_config_alt_screen".to_string(), "display.alt_screen: true | false（交互模式是否使用备用屏，环境变量 NT_ALT_SCREEN 可覆盖）".to_string());

        // Runtime messages
        zh.insert("track_en".to_string(), "中->英".to_string());
        zh.insert("track_kr".to_string(), "中->韩".to_string());
        zh.insert("no_translation".to_string(), "无此翻译结果".to_string());
        zh.insert("data_missing".to_string(), "未找到翻译数据信息".to_string());
        zh.insert("dict_load_error".to_string(), "加载{0}主数据时异常：{1}".to_string());
        zh.insert("country_load_error".to_string(), "加载[{0}]数据时异常：{1}".to_string());
        zh.insert("did_you_mean".to_string(), "是否要找：{0}".to_string());

        // Watch mode
        zh.insert("input_placeholder".to_string(), "输入需翻译的角色中文名称：".to_string());
        zh.insert("watch_hint".to_string(), "Esc=退出, Delete=清空, Backspace=删除".to_string());
        zh.insert("warning_interactive_failed".to_string(), "警告: 无法启用终端原始模式，交互模式不可用".to_string());

        // Info / countries output
        zh.insert("info_country".to_string(), "国家".to_string());
        zh.insert("info_hid".to_string(), "HID".to_string());
        zh.insert("info_names".to_string(), "可用名称".to_string());
        zh.insert("info_not_found".to_string(), "未找到 {0} 的记录".to_string());
        zh.insert("countries_header".to_string(), "{0} 中的国家数据表:".to_string());
        zh.insert("countries_none".to_string(), "未找到国家数据表".to_string());
        zh.insert("countries_entry".to_string(), "{0}: {1} 条记录".to_string());
        zh.insert("countries_invalid".to_string(), "{0}: 无法读取（{1}）".to_string());

        translations.insert("en".to_string(), en);
        translations.insert("zh".to_string(), zh);

        // 确定语言 - 支持多种语言代码格式
        let effective_lang = if lang.starts_with("zh") || lang == "cn" || lang == "chinese" {
            "zh"
        } else {
            // 默认使用英文
            "en"
        };

        Self {
            translations,
            current_lang: effective_lang.to_string(),
        }
    }

    pub fn t(&self, key: &str) -> String {
        if let Some(lang_map) = self.translations.get(&self.current_lang) {
            if let Some(value) = lang_map.get(key) {
                return value.clone();
            }
        }
        key.to_string()
    }

    pub fn t_format(&self, key: &str, args: &[&str]) -> String {
        let template = self.t(key);
        let mut result = template;
        for (i, arg) in args.iter().enumerate() {
            result = result.replace(&format!("{{{}}}", i), arg);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_key_for_unknown_entries() {
        let i18n = I18n::new("en");
        assert_eq!(i18n.t("definitely_not_a_key"), "definitely_not_a_key");
    }

    #[test]
    fn formats_positional_arguments() {
        let i18n = I18n::new("en");
        let msg = i18n.t_format("dict_load_error", &["CN -> EN", "boom"]);
        assert_eq!(msg, "failed to load CN -> EN dictionary: boom");
    }

    #[test]
    fn selects_chinese_for_zh_locales() {
        let i18n = I18n::new("zh_CN");
        assert_eq!(i18n.t("no_translation"), "无此翻译结果");
        let i18n = I18n::new("fr_FR");
        assert_eq!(i18n.t("no_translation"), "no translation result");
    }
}
