// ============================================================================
// I18N - Textos de la interfaz (japonés)
// ============================================================================

use std::collections::HashMap;

/// Diccionario de textos
fn get_translations() -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();

    // App
    translations.insert("app_title", "湯録 (Yuroku)");
    translations.insert("loading", "読み込み中...");
    translations.insert("back", "戻る");
    translations.insert("footer_text", "湯録 - あなたの温泉記録");
    translations.insert("not_found", "ページが見つかりません。");

    // Header
    translations.insert("nav_list", "温泉メモ");
    translations.insert("nav_new", "新規作成");
    translations.insert("nav_login", "ログイン");
    translations.insert("nav_register", "新規登録");
    translations.insert("nav_logout", "ログアウト");

    // Home
    translations.insert("home_headline", "訪れた温泉を、記録しよう");
    translations.insert("home_lead", "感想・評価・写真をまとめて残せる温泉メモ");
    translations.insert("home_start", "はじめる");
    translations.insert("home_view_logs", "温泉メモを見る");
    translations.insert("home_start_free", "無料で始める");
    translations.insert("home_features_title", "湯録の特徴");
    translations.insert("home_feature_record", "簡単記録");
    translations.insert("home_feature_record_body", "訪れた温泉の基本情報や感想を簡単に記録できます。写真も添付可能です。");
    translations.insert("home_feature_review", "振り返り");
    translations.insert("home_feature_review_body", "訪問日や評価で並べ替え・絞り込みして、お気に入りの温泉をすぐに見つけられます。");
    translations.insert("home_feature_export", "エクスポート");
    translations.insert("home_feature_export_body", "記録はいつでもJSONやCSVでダウンロードできます。");
    translations.insert("home_cta_title", "今すぐ湯録を始めましょう");
    translations.insert("home_cta_button", "無料アカウント作成");

    // Auth
    translations.insert("login_title", "ログイン");
    translations.insert("login_subtitle", "アカウント情報を入力してログインしてください");
    translations.insert("register_title", "新規登録");
    translations.insert("register_subtitle", "アカウントを作成してください");
    translations.insert("email", "メールアドレス");
    translations.insert("password", "パスワード");
    translations.insert("password_confirm", "パスワード（確認）");
    translations.insert("login_button", "ログイン");
    translations.insert("login_loading", "ログイン中...");
    translations.insert("register_button", "登録する");
    translations.insert("register_loading", "登録中...");
    translations.insert("no_account", "アカウントをお持ちでない方は");
    translations.insert("have_account", "すでにアカウントをお持ちの方は");
    translations.insert("login_failed", "ログインに失敗しました。もう一度お試しください。");
    translations.insert("register_failed", "登録に失敗しました。もう一度お試しください。");

    // List
    translations.insert("list_title", "温泉メモ一覧");
    translations.insert("new_log", "新規メモ作成");
    translations.insert("filters", "フィルター");
    translations.insert("sort_visit_date", "訪問日");
    translations.insert("sort_rating", "評価");
    translations.insert("search_placeholder", "温泉名や場所で検索...");
    translations.insert("filter_name", "温泉名");
    translations.insert("filter_location", "場所");
    translations.insert("filter_min_rating", "最低評価");
    translations.insert("filter_max_rating", "最高評価");
    translations.insert("filter_from", "開始日");
    translations.insert("filter_to", "終了日");
    translations.insert("reset", "リセット");
    translations.insert("apply", "適用");
    translations.insert("empty_list", "温泉メモがまだありません。");
    translations.insert("create_first", "最初のメモを作成");
    translations.insert("prev", "前へ");
    translations.insert("next", "次へ");
    translations.insert("fetch_list_failed", "温泉メモの取得に失敗しました。もう一度お試しください。");
    translations.insert("export_failed", "エクスポートに失敗しました。");
    translations.insert("export_json", "JSONエクスポート");
    translations.insert("export_csv", "CSVエクスポート");
    translations.insert("search", "検索");
    translations.insert("sort_asc", "昇順");
    translations.insert("sort_desc", "降順");
    translations.insert("filter_name_placeholder", "温泉名で絞り込み");
    translations.insert("filter_location_placeholder", "場所で絞り込み");
    translations.insert("page_of", "{page} / {total} ページ");

    // Form
    translations.insert("new_title", "新規温泉メモ作成");
    translations.insert("edit_title", "温泉メモの編集");
    translations.insert("field_name", "温泉名 *");
    translations.insert("field_location", "場所");
    translations.insert("field_location_required", "場所 *");
    translations.insert("field_visit_date", "訪問日 *");
    translations.insert("field_rating", "評価 (0-5)");
    translations.insert("field_spring_type", "泉質");
    translations.insert("field_spring_type_required", "泉質 *");
    translations.insert("field_features", "特徴");
    translations.insert("field_comment", "感想・メモ");
    translations.insert("select_placeholder", "選択してください");
    translations.insert("photos", "写真");
    translations.insert("choose_photos", "写真を選択");
    translations.insert("photo_hint", "JPG, PNG, GIF形式（最大5MB）");
    translations.insert("save", "保存");
    translations.insert("saving", "保存中...");
    translations.insert("cancel", "キャンセル");
    translations.insert("required_fields", "必須項目を入力してください");
    translations.insert("name_required", "温泉名は必須です。");
    translations.insert("visit_date_required", "訪問日は必須です。");
    translations.insert("location_required", "場所は必須です。");
    translations.insert("spring_type_required", "泉質は必須です。");
    translations.insert("create_failed", "温泉メモの作成に失敗しました。もう一度お試しください。");
    translations.insert("update_failed", "更新に失敗しました。もう一度お試しください。");
    translations.insert("upload_partial", "温泉メモは作成されましたが、画像のアップロードに失敗しました。");
    translations.insert("image_invalid_type", "画像ファイルを選択してください。");
    translations.insert("image_too_large", "画像サイズは5MB以下にしてください。");

    // Detail
    translations.insert("edit", "編集");
    translations.insert("delete", "削除");
    translations.insert("delete_confirm", "この温泉メモを削除しますか？");
    translations.insert("delete_failed", "削除に失敗しました。");
    translations.insert("fetch_failed", "温泉メモの取得に失敗しました。もう一度お試しください。");
    translations.insert("delete_image", "写真を削除");
    translations.insert("delete_confirm_button", "削除確認");
    translations.insert("comment", "コメント");
    translations.insert("created_at", "作成日");
    translations.insert("updated_at", "更新日");
    translations.insert("back_to_list", "一覧に戻る");
    translations.insert("name_placeholder", "例: 登別温泉");
    translations.insert("location_placeholder", "例: 北海道札幌市");
    translations.insert("comment_placeholder", "温泉の感想や思い出を自由に記録しましょう");
    translations.insert("remove", "削除");

    // Errors
    translations.insert("err_unexpected", "予期しないエラーが発生しました。もう一度お試しください。");
    translations.insert("err_unexpected_later", "予期しないエラーが発生しました。後でもう一度お試しください。");
    translations.insert("err_session_expired", "セッションの期限が切れました。再度ログインしてください。");
    translations.insert("err_invalid_input", "入力内容に誤りがあります。");
    translations.insert("err_unreachable", "サーバーに接続できません。インターネット接続を確認してください。");
    translations.insert("err_auth_required", "ログインしてください。");

    translations
}

/// Función de traducción; devuelve la clave si no hay traducción
pub fn tr(key: &str) -> String {
    match get_translations().get(key) {
        Some(translation) => translation.to_string(),
        None => key.to_string(),
    }
}
