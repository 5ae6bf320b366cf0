/// Shown for any provider code missing from the table.
pub const DEFAULT_AUTH_ERROR: &str = "Erro de autenticação. Tente novamente.";

const AUTH_ERROR_MESSAGES: &[(&str, &str)] = &[
    ("auth/user-not-found", "Usuário não encontrado."),
    ("auth/wrong-password", "Senha incorreta."),
    ("auth/email-already-in-use", "Este email já está em uso."),
    ("auth/weak-password", "A senha deve ter pelo menos 6 caracteres."),
    ("auth/invalid-email", "Email inválido."),
    ("auth/user-disabled", "Esta conta foi desabilitada."),
    (
        "auth/too-many-requests",
        "Muitas tentativas. Tente novamente mais tarde.",
    ),
    (
        "auth/network-request-failed",
        "Erro de conexão. Verifique sua internet.",
    ),
    ("auth/invalid-credential", "Credenciais inválidas."),
    ("auth/operation-not-allowed", "Operação não permitida."),
    (
        "auth/requires-recent-login",
        "Por segurança, faça login novamente.",
    ),
];

/// Maps a provider error code to the message shown to the user.
pub fn auth_error_message(code: &str) -> &'static str {
    AUTH_ERROR_MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
        .unwrap_or(DEFAULT_AUTH_ERROR)
}
