pub fn render_password_recovery(name: &str, reset_link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Recuperação de senha</h2>
    <p>Olá {name},</p>
    <p>Recebemos um pedido para redefinir a senha da sua conta Roleplay.</p>
    <p><a href="{reset_link}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Redefinir senha</a></p>
    <p style="color: #666; font-size: 14px;">Este link expira em 2 horas. Se você não pediu a redefinição, ignore este email.</p>
</body>
</html>"#
    )
}
